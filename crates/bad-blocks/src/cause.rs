use assay_primitives::BlockHash;
use std::{error::Error, fmt, sync::Arc};

/// Why a block was classified as bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadBlockReason {
    /// The block itself failed a protocol rule.
    ValidationFailure,
    /// The block builds on a block that is already known to be bad.
    DescendsFromBadBlock,
}

impl fmt::Display for BadBlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailure => f.write_str("validation failure"),
            Self::DescendsFromBadBlock => f.write_str("descends from bad block"),
        }
    }
}

/// The cause recorded alongside a bad block or header.
#[derive(Clone)]
pub struct BadBlockCause {
    reason: BadBlockReason,
    description: String,
    fault: Option<Arc<dyn Error + Send + Sync>>,
}

impl BadBlockCause {
    /// A block that failed a validation rule.
    pub fn from_validation_failure(description: impl Into<String>) -> Self {
        Self {
            reason: BadBlockReason::ValidationFailure,
            description: description.into(),
            fault: None,
        }
    }

    /// A block whose state transition surfaced an error.
    pub fn from_processing_error<E>(fault: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            reason: BadBlockReason::ValidationFailure,
            description: fault.to_string(),
            fault: Some(Arc::new(fault)),
        }
    }

    /// A block that builds on the given bad ancestor.
    pub fn from_bad_ancestor(ancestor: BlockHash) -> Self {
        Self {
            reason: BadBlockReason::DescendsFromBadBlock,
            description: format!("descends from bad block {ancestor}"),
            fault: None,
        }
    }

    /// Replaces the human readable description, keeping the reason and any fault.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the reason category.
    pub const fn reason(&self) -> BadBlockReason {
        self.reason
    }

    /// Returns the human readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the error that caused the block to be rejected, if one was surfaced.
    pub fn fault(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.fault.as_deref()
    }
}

impl fmt::Debug for BadBlockCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadBlockCause")
            .field("reason", &self.reason)
            .field("description", &self.description)
            .field("fault", &self.fault.as_ref().map(|fault| fault.to_string()))
            .finish()
    }
}

impl fmt::Display for BadBlockCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.description)
    }
}
