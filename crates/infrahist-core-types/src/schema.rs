//! Canonical schema constants for structured logging and events
//!
//! These constants keep the field names emitted by the history pipeline
//! consistent between the logging macros and the tests that capture them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Revision identifiers
pub const FIELD_REVISION_ID: &str = "revision_id";
pub const FIELD_FROM_REVISION: &str = "from_revision";
pub const FIELD_TO_REVISION: &str = "to_revision";
pub const FIELD_REGION: &str = "region";

// Collection sizes
pub const FIELD_REVISION_COUNT: &str = "revision_count";
pub const FIELD_DIFF_COUNT: &str = "diff_count";
pub const FIELD_BLOCK_COUNT: &str = "block_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
