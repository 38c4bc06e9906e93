use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised while walking and presenting infrastructure history. Each kind maps
/// to a stable error code usable by tests and by the CLI's fatal-error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    /// A resource graph violates its structural rules (duplicate ids, parent cycles)
    InvalidGraph,
    /// A snapshot file in the revision store could not be decoded
    InvalidSnapshot,

    // Configuration
    /// A required persisted default (e.g. the region) is not set
    ConfigMissing,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    /// An external tool (git) failed or produced unexpected output
    ExternalService,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidGraph => "ERR_INVALID_GRAPH",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::ConfigMissing => "ERR_CONFIG_MISSING",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, revision or resource id, message) needed to explain a fatal
/// history failure on a single line.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (revision id, resource id or defaults key)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Structural errors detected while indexing or diffing a resource graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Two resources in the same graph share an id
    #[error("Duplicate resource id in graph: {resource_id}")]
    DuplicateResource { resource_id: String },

    /// Following parent links from a resource returns to it
    #[error("Parent cycle detected at resource {resource_id}")]
    ParentCycle { resource_id: String },

    /// A resource has an empty id
    #[error("Resource of kind {kind} has an empty id")]
    EmptyResourceId { kind: String },
}

impl From<GraphError> for ExError {
    fn from(err: GraphError) -> Self {
        let entity_id = match &err {
            GraphError::DuplicateResource { resource_id }
            | GraphError::ParentCycle { resource_id } => Some(resource_id.clone()),
            GraphError::EmptyResourceId { .. } => None,
        };
        let ex = ExError::new(ExErrorKind::InvalidGraph).with_message(err.to_string());
        match entity_id {
            Some(id) => ex.with_entity_id(id),
            None => ex,
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

impl From<std::io::Error> for ExError {
    fn from(err: std::io::Error) -> Self {
        ExError::new(ExErrorKind::Io).with_message(err.to_string())
    }
}
