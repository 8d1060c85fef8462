use thiserror::Error;

/// Result type alias using HelpdeskError
pub type Result<T> = std::result::Result<T, HelpdeskError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that tests, logs and the chat
/// dispatcher can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HdErrorKind {
    // Validation
    /// A required field is missing, empty or too long (caught before any store access)
    InvalidInput,
    /// A lookup by id or email missed
    NotFound,

    // Storage constraints
    /// A UNIQUE constraint rejected the write (duplicate email)
    UniqueConstraintViolation,
    /// A FOREIGN KEY constraint rejected the write (unknown ticket owner)
    ForeignKeyViolation,
    /// Any other constraint breach (NOT NULL, CHECK, migration checksum)
    ConstraintViolation,

    // Storage plumbing
    /// The database file could not be opened or written
    StorageUnavailable,
    Persistence,

    // Process / integration
    Configuration,
    ExternalService,
    Serialization,

    // Internal
    Internal,
}

impl HdErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            HdErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            HdErrorKind::NotFound => "ERR_NOT_FOUND",
            HdErrorKind::UniqueConstraintViolation => "ERR_UNIQUE_VIOLATION",
            HdErrorKind::ForeignKeyViolation => "ERR_FOREIGN_KEY_VIOLATION",
            HdErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            HdErrorKind::StorageUnavailable => "ERR_STORAGE_UNAVAILABLE",
            HdErrorKind::Persistence => "ERR_PERSISTENCE",
            HdErrorKind::Configuration => "ERR_CONFIGURATION",
            HdErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            HdErrorKind::Serialization => "ERR_SERIALIZATION",
            HdErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus context
/// (operation, entity, field) for debugging. Errors converted from a
/// `HelpdeskError` keep it as their `source()`.
#[derive(Debug, Clone)]
pub struct HdError {
    kind: HdErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    field: Option<String>,
    message: String,
    domain: Option<HelpdeskError>,
}

impl HdError {
    /// Create a new error with the specified kind
    pub fn new(kind: HdErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            field: None,
            message: String::new(),
            domain: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (user id, ticket id or email)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add the name of the offending field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> HdErrorKind {
        self.kind
    }

    /// Check the error kind
    pub fn is(&self, kind: HdErrorKind) -> bool {
        self.kind == kind
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

    /// Get the offending field, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The domain error this was converted from, if any
    pub fn domain(&self) -> Option<&HelpdeskError> {
        self.domain.as_ref()
    }
}

impl std::fmt::Display for HdError {
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

impl std::error::Error for HdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.domain
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for helpdesk operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HelpdeskError {
    // ===== Validation Errors =====
    /// Required field missing or blank
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// Field longer than the column allows
    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    /// Ticket id literal is not an integer
    #[error("Invalid ticket id: '{raw}'")]
    InvalidTicketId { raw: String },

    // ===== Configuration Errors =====
    #[error("Missing required configuration: {key}")]
    MissingConfig { key: &'static str },

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

impl From<HelpdeskError> for HdError {
    fn from(err: HelpdeskError) -> Self {
        let base = match &err {
            HelpdeskError::EmptyField { field } | HelpdeskError::FieldTooLong { field, .. } => {
                HdError::new(HdErrorKind::InvalidInput).with_field(*field)
            }

            HelpdeskError::InvalidTicketId { raw } => HdError::new(HdErrorKind::InvalidInput)
                .with_field("id")
                .with_entity_id(raw.clone()),

            HelpdeskError::MissingConfig { key } | HelpdeskError::InvalidConfig { key, .. } => {
                HdError::new(HdErrorKind::Configuration).with_field(*key)
            }
        };

        HdError {
            message: err.to_string(),
            domain: Some(err),
            ..base
        }
    }
}
