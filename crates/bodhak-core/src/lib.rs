//! Core types and static reference data for Bodhak: exam catalog, questions,
//! document metadata and the demo progress dataset.

pub mod catalog;
pub mod document;
mod error;
pub mod progress;
pub mod question;

pub use catalog::{CannedAnswer, Catalog, ExamSpec, ExamStats};
pub use document::{DocumentEntry, UploadStatus, format_file_size};
pub use error::ParseError;
pub use progress::{Activity, ProgressSnapshot, SubjectProgress};
pub use question::{Difficulty, Question, QuestionOrigin, QuestionType};
