use thiserror::Error;

/// Failure to parse a user-supplied selection value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown difficulty: {0} (expected Easy, Medium or Hard)")]
    Difficulty(String),

    #[error("unknown question type: {0} (expected MCQ, Numerical or Theory)")]
    QuestionType(String),

    #[error("unknown document status: {0}")]
    Status(String),
}
