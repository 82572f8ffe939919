//! Practice question types shared by the catalog and the generator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Question difficulty as shown on the practice card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseError::Difficulty(s.to_string())),
        }
    }
}

/// Answer format of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[default]
    #[serde(rename = "MCQ")]
    Mcq,
    Numerical,
    Theory,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [Self::Mcq, Self::Numerical, Self::Theory];

    /// Short tag, e.g. `MCQ`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mcq => "MCQ",
            Self::Numerical => "Numerical",
            Self::Theory => "Theory",
        }
    }

    /// Human label used in selection lists.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mcq => "Multiple Choice",
            Self::Numerical => "Numerical",
            Self::Theory => "Theory",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mcq" | "multiple choice" | "multiple-choice" => Ok(Self::Mcq),
            "numerical" => Ok(Self::Numerical),
            "theory" => Ok(Self::Theory),
            _ => Err(ParseError::QuestionType(s.to_string())),
        }
    }
}

/// Where a question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionOrigin {
    /// Fixed sample question from the catalog.
    Catalog,
    /// Templated filler generated for a single request.
    Synthetic,
}

/// A practice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Present for multiple-choice questions only.
    pub options: Option<Vec<String>>,
    pub correct_option: Option<String>,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub subject: String,
    pub topic: String,
    /// Exam offering this subject/topic pair. `None` for synthetic questions
    /// on a generic topic.
    pub exam: Option<String>,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub origin: QuestionOrigin,
}

impl Question {
    pub fn is_synthetic(&self) -> bool {
        self.origin == QuestionOrigin::Synthetic
    }

    /// Zero-based index of the correct option, if any.
    pub fn correct_index(&self) -> Option<usize> {
        let correct = self.correct_option.as_deref()?;
        self.options.as_ref()?.iter().position(|o| o == correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn question_type_accepts_labels() {
        assert_eq!("MCQ".parse::<QuestionType>().unwrap(), QuestionType::Mcq);
        assert_eq!(
            "Multiple Choice".parse::<QuestionType>().unwrap(),
            QuestionType::Mcq
        );
        assert_eq!(
            "numerical".parse::<QuestionType>().unwrap(),
            QuestionType::Numerical
        );
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn defaults_match_generator_fallbacks() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(QuestionType::default(), QuestionType::Mcq);
    }

    #[test]
    fn type_serializes_as_mcq_tag() {
        let json = serde_json::to_string(&QuestionType::Mcq).unwrap();
        assert_eq!(json, "\"MCQ\"");
    }
}
