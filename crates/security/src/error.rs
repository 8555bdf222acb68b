//! Security error types

use contracts::{ContractError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Key is not `KEY_LEN` bytes
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    #[error("encryption failed")]
    Encryption,

    /// Token truncated, tampered with, or sealed under another key
    #[error("decryption failed: {reason}")]
    Decryption { reason: String },

    #[error("unsafe filename '{name}': {reason}")]
    UnsafeFilename { name: String, reason: String },
}

impl SecurityError {
    pub fn decryption(reason: impl Into<String>) -> Self {
        Self::Decryption {
            reason: reason.into(),
        }
    }

    pub fn unsafe_filename(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsafeFilename {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Contract(e) => e.kind(),
            Self::InvalidKey { .. } | Self::Decryption { .. } | Self::UnsafeFilename { .. } => {
                ErrorKind::BadInput
            }
            Self::Encryption => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, SecurityError>;
