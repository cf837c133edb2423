use assay_evm::{BlockExecutionError, BlockExecutionOutput};

/// The outcome of one validation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// The block is valid and its state transition was applied.
    Successful(BlockExecutionOutput),
    /// The block was rejected, or could not be processed because something it depends on is not
    /// available locally.
    Failed {
        /// What went wrong.
        message: String,
    },
    /// Processing was aborted by an error.
    FailedExceptionally {
        /// What went wrong, including the text of `cause`.
        message: String,
        /// The error that aborted processing.
        cause: BlockExecutionError,
    },
}

impl ProcessingResult {
    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self::Failed { message: message.into() }
    }

    pub(crate) fn failed_exceptionally(
        message: impl Into<String>,
        cause: impl Into<BlockExecutionError>,
    ) -> Self {
        Self::FailedExceptionally { message: message.into(), cause: cause.into() }
    }

    /// Returns `true` if the block is valid.
    pub const fn is_successful(&self) -> bool {
        matches!(self, Self::Successful(_))
    }

    /// Returns `true` if validation failed, exceptionally or not.
    pub const fn is_failed(&self) -> bool {
        !self.is_successful()
    }

    /// Returns the error that aborted processing.
    pub const fn caused_by(&self) -> Option<&BlockExecutionError> {
        match self {
            Self::FailedExceptionally { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Returns the failure message.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Successful(_) => None,
            Self::Failed { message } | Self::FailedExceptionally { message, .. } => Some(message),
        }
    }

    /// Returns the outputs of the state transition of a valid block.
    pub const fn output(&self) -> Option<&BlockExecutionOutput> {
        match self {
            Self::Successful(output) => Some(output),
            _ => None,
        }
    }

    /// Consumes the result and returns the outputs of the state transition of a valid block.
    pub fn into_output(self) -> Option<BlockExecutionOutput> {
        match self {
            Self::Successful(output) => Some(output),
            _ => None,
        }
    }
}
