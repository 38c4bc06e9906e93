//! Rendering of graph diffs as text.
//!
//! Two layouts are provided, both anchored at the run's root resource:
//! - [`DisplayFormat::Tree`]: changed resources nested under their ancestors
//! - [`DisplayFormat::Table`]: one row per changed attribute

pub mod table;
pub mod tree;

pub use table::render_table;
pub use tree::render_tree;

use std::io::Write;

use crate::diff::GraphDiff;
use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::Resource;

/// Layout used to draw a graph diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    Tree,
    Table,
}

/// Draws a graph diff onto an output stream
pub trait Renderer {
    /// Render `diff` in `format`, positioned relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Io` if writing to `out` fails.
    fn render(
        &self,
        out: &mut dyn Write,
        diff: &GraphDiff,
        format: DisplayFormat,
        root: &Resource,
    ) -> Result<()>;
}

/// Plain-text renderer with box-drawing trees and padded tables
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(
        &self,
        out: &mut dyn Write,
        diff: &GraphDiff,
        format: DisplayFormat,
        root: &Resource,
    ) -> Result<()> {
        let text = match format {
            DisplayFormat::Tree => render_tree(diff, root),
            DisplayFormat::Table => render_table(diff, root),
        };
        out.write_all(text.as_bytes()).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("render")
                .with_message(e.to_string())
        })
    }
}
