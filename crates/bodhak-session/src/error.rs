use thiserror::Error;

use crate::upload::{UploadId, UploadRecord};

/// Upload intake and cancellation failures.
///
/// Rejections carry the rejected record so the caller can still show it.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported file type: {}", .0.file_name)]
    UnsupportedType(UploadRecord),

    #[error("File too large: {} (Max: 50MB)", .0.file_name)]
    TooLarge(UploadRecord),

    #[error("no in-flight upload with id {0}")]
    UnknownUpload(UploadId),

    #[error("upload {0} has already been processed")]
    AlreadyProcessed(UploadId),
}

impl UploadError {
    /// The rejected record, for intake failures.
    pub fn rejected_record(&self) -> Option<&UploadRecord> {
        match self {
            Self::UnsupportedType(r) | Self::TooLarge(r) => Some(r),
            Self::UnknownUpload(_) | Self::AlreadyProcessed(_) => None,
        }
    }
}

/// Session-level validation failures, surfaced to the learner as error
/// notifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please select a {0} first!")]
    MissingSelection(&'static str),

    #[error("unknown exam: {0}")]
    UnknownExam(String),

    #[error("message is empty")]
    EmptyMessage,
}
