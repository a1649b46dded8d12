use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid_input - {0}")]
    InvalidInput(String),
    #[error("invalid_data - {0}")]
    InvalidData(String),
    #[error("not_found - {0}")]
    NotFound(String),
    #[error("invalid_deadline - {0}")]
    InvalidDeadline(String),
    #[error("storage_unreadable - {0}")]
    StorageUnreadable(String),
    #[error("storage_unwritable - {0}")]
    StorageUnwritable(String),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_deadline<M: Into<String>>(message: M) -> Self {
        Self::InvalidDeadline(message.into())
    }

    pub fn storage_unreadable<M: Into<String>>(message: M) -> Self {
        Self::StorageUnreadable(message.into())
    }

    pub fn storage_unwritable<M: Into<String>>(message: M) -> Self {
        Self::StorageUnwritable(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData(_) => "invalid_data",
            Self::NotFound(_) => "not_found",
            Self::InvalidDeadline(_) => "invalid_deadline",
            Self::StorageUnreadable(_) => "storage_unreadable",
            Self::StorageUnwritable(_) => "storage_unwritable",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message)
            | Self::InvalidData(message)
            | Self::NotFound(message)
            | Self::InvalidDeadline(message)
            | Self::StorageUnreadable(message)
            | Self::StorageUnwritable(message) => message,
        }
    }

    /// Process exit status the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::NotFound(_) => 3,
            Self::InvalidDeadline(_) => 4,
            Self::InvalidData(_) | Self::StorageUnreadable(_) | Self::StorageUnwritable(_) => 5,
        }
    }
}
