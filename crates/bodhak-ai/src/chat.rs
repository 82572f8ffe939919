//! Canned tutoring replies.
//!
//! A message is matched against the catalog's canned answers in priority
//! order. An answer matches when any word longer than three characters from
//! its prompt occurs as a substring of the lowercased message. Short common
//! words such as "what" therefore count, so broad questions often land on the
//! first canned answer. Messages matching nothing fall through to a fixed set
//! of category templates.

use bodhak_core::{CannedAnswer, Catalog};
use serde::{Deserialize, Serialize};
use tracing::debug;

const CALCULATION_GUIDANCE: &str = "To solve this calculation problem, I'll guide you through the step-by-step approach:\n\n\
1. **Identify given values** - List all known quantities\n\
2. **Choose the right formula** - Select the appropriate equation\n\
3. **Substitute values** - Replace variables with numbers\n\
4. **Calculate the result** - Perform the mathematical operations\n\n\
Could you provide the specific numerical values or equation you're working with?";

const GENERIC_REPLY: &str = "I understand your question. Based on my knowledge of NEET and JEE topics, \
I can provide you with a comprehensive answer. Let me break this down for you step by step.";

/// Which rule produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Index into the canned-answer table.
    Canned(usize),
    Calculation,
    Concept,
    Comparison,
    Generic,
}

/// An answer with the sources cited under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub sources: Vec<String>,
    pub kind: ReplyKind,
}

impl ChatReply {
    fn new(text: String, sources: &[&str], kind: ReplyKind) -> Self {
        Self {
            text,
            sources: sources.iter().map(|s| s.to_string()).collect(),
            kind,
        }
    }
}

/// Keyword matcher over a fixed table of canned answers.
#[derive(Debug, Clone, Copy)]
pub struct ChatResponder<'a> {
    answers: &'a [CannedAnswer],
}

impl<'a> ChatResponder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_answers(&catalog.canned_answers)
    }

    /// Responder over an explicit answer table, in priority order.
    pub fn with_answers(answers: &'a [CannedAnswer]) -> Self {
        Self { answers }
    }

    /// Answer `message`. `exam` is the learner's selected exam, if any, and
    /// is interpolated into the concept and comparison templates.
    pub fn respond(&self, message: &str, exam: Option<&str>) -> ChatReply {
        let lower = message.to_lowercase();

        if let Some((idx, answer)) = self
            .answers
            .iter()
            .enumerate()
            .find(|(_, a)| prompt_matches(&a.prompt, &lower))
        {
            debug!(idx, "canned answer matched");
            return ChatReply {
                text: answer.answer.clone(),
                sources: answer.sources.clone(),
                kind: ReplyKind::Canned(idx),
            };
        }

        if lower.contains("calculate") || lower.contains("find") {
            ChatReply::new(
                CALCULATION_GUIDANCE.to_string(),
                &["Mathematical Problem Solving Guide", "NCERT Mathematics"],
                ReplyKind::Calculation,
            )
        } else if lower.contains("explain") || lower.contains("what is") {
            ChatReply::new(
                concept_explanation(exam.unwrap_or("competitive exams")),
                &["Concept Explanation Database", "Previous Year Analysis"],
                ReplyKind::Concept,
            )
        } else if lower.contains("difference") {
            ChatReply::new(
                comparison(exam.unwrap_or("competitive exam")),
                &[
                    "Comparative Analysis",
                    "NCERT Textbooks",
                    "Previous Year Questions",
                ],
                ReplyKind::Comparison,
            )
        } else {
            ChatReply::new(
                GENERIC_REPLY.to_string(),
                &["Bodhak AI Knowledge Base", "NCERT Textbooks"],
                ReplyKind::Generic,
            )
        }
    }
}

fn prompt_matches(prompt: &str, lower_message: &str) -> bool {
    prompt
        .to_lowercase()
        .split_whitespace()
        .any(|word| word.chars().count() > 3 && lower_message.contains(word))
}

fn concept_explanation(context: &str) -> String {
    format!(
        "I'd be happy to explain this concept! Let me provide a comprehensive explanation:\n\n\
         **Definition:** This is a fundamental concept in {context}.\n\n\
         **Key Points:**\n\
         • Core principles and applications\n\
         • Important formulas or mechanisms\n\
         • Common exam questions and patterns\n\
         • Real-world relevance\n\n\
         Would you like me to elaborate on any specific aspect of this topic?"
    )
}

fn comparison(context: &str) -> String {
    format!(
        "Great question! Understanding differences between similar concepts is crucial for exams. \
         Let me compare these concepts:\n\n\
         **Concept A:**\n\
         • Key characteristics\n\
         • Applications and examples\n\
         • Important properties\n\n\
         **Concept B:**\n\
         • Distinguishing features\n\
         • Different applications\n\
         • Unique properties\n\n\
         **Key Differences:**\n\
         • Structure and composition\n\
         • Function and purpose\n\
         • Occurrence and examples\n\n\
         This type of comparison often appears in {context} questions!"
    )
}

// ── Prompt shortcuts ──

/// Ready-made questions offered as one-click samples, keyed by short name.
pub const SAMPLE_PROMPTS: &[(&str, &str)] = &[
    (
        "Mitosis",
        "What is the difference between mitosis and meiosis?",
    ),
    ("Photoelectric", "Explain the photoelectric effect"),
    (
        "Harmonic",
        "What are the conditions for Simple Harmonic Motion?",
    ),
    (
        "Hybridization",
        "Explain hybridization in organic compounds",
    ),
];

/// Look up a sample prompt by (case-insensitive) name.
pub fn sample_prompt(name: &str) -> Option<&'static str> {
    SAMPLE_PROMPTS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
        .map(|(_, prompt)| *prompt)
}

/// Sentence starters the input box can prefill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptHelper {
    Calculate,
    Explain,
    Compare,
}

impl PromptHelper {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Calculate => "Calculate the ",
            Self::Explain => "Explain the concept of ",
            Self::Compare => "What is the difference between ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> ChatResponder<'static> {
        ChatResponder::new(Catalog::builtin())
    }

    #[test]
    fn mitosis_question_gets_canned_answer() {
        let reply = responder().respond("What is the difference between mitosis and meiosis?", None);
        assert_eq!(reply.kind, ReplyKind::Canned(0));
        assert!(reply.text.starts_with("Mitosis and meiosis are both cell division processes"));
        assert_eq!(
            reply.sources,
            vec!["NCERT Biology Class 11 Chapter 10", "Previous Year NEET 2023"]
        );
    }

    #[test]
    fn substring_mitosis_is_enough() {
        let reply = responder().respond("tell me about MITOSIS stages", None);
        assert_eq!(reply.kind, ReplyKind::Canned(0));
    }

    #[test]
    fn photoelectric_matches_second_entry() {
        let reply = responder().respond("photoelectric threshold frequency", Some("JEE"));
        assert_eq!(reply.kind, ReplyKind::Canned(1));
        assert_eq!(reply.sources.len(), 2);
        assert!(reply.text.contains("E = hf - φ"));
    }

    #[test]
    fn calculation_fallback() {
        let reply = responder().respond("Calculate the force on a 2kg mass", None);
        assert_eq!(reply.kind, ReplyKind::Calculation);
        assert!(reply.text.contains("Identify given values"));
        assert_eq!(
            reply.sources,
            vec!["Mathematical Problem Solving Guide", "NCERT Mathematics"]
        );
    }

    #[test]
    fn builtin_answers_shadow_concept_and_comparison_rules() {
        let r = responder();
        assert_eq!(r.respond("What is entropy?", None).kind, ReplyKind::Canned(0));
        assert_eq!(r.respond("Explain entropy", None).kind, ReplyKind::Canned(1));
        assert_eq!(
            r.respond("acids vs bases: key difference?", None).kind,
            ReplyKind::Canned(0)
        );
    }

    #[test]
    fn concept_fallback_interpolates_exam() {
        let r = ChatResponder::with_answers(&[]);
        let reply = r.respond("Explain entropy", Some("NEET"));
        assert_eq!(reply.kind, ReplyKind::Concept);
        assert!(reply.text.contains("fundamental concept in NEET."));
        assert_eq!(
            reply.sources,
            vec!["Concept Explanation Database", "Previous Year Analysis"]
        );

        let reply = r.respond("what is entropy", None);
        assert!(reply.text.contains("fundamental concept in competitive exams."));
    }

    #[test]
    fn comparison_fallback() {
        let r = ChatResponder::with_answers(&[]);
        let reply = r.respond("difference between acids and bases", Some("JEE"));
        assert_eq!(reply.kind, ReplyKind::Comparison);
        assert!(reply.text.ends_with("often appears in JEE questions!"));
        assert_eq!(reply.sources.len(), 3);
    }

    #[test]
    fn calculation_rule_outranks_concept_rule() {
        let r = ChatResponder::with_answers(&[]);
        let reply = r.respond("explain how to find the pH", None);
        assert_eq!(reply.kind, ReplyKind::Calculation);
    }

    #[test]
    fn unmatched_message_is_generic() {
        let reply = responder().respond("any diff? show me the contrast", None);
        assert_eq!(reply.kind, ReplyKind::Generic);
    }

    #[test]
    fn comparison_template_renders_context() {
        assert!(comparison("JEE").ends_with("often appears in JEE questions!"));
    }

    #[test]
    fn generic_fallback_sources() {
        let reply = responder().respond("hello there", None);
        assert_eq!(reply.kind, ReplyKind::Generic);
        assert_eq!(
            reply.sources,
            vec!["Bodhak AI Knowledge Base", "NCERT Textbooks"]
        );
    }

    #[test]
    fn short_words_do_not_match() {
        // "the" and "is" are too short to count.
        assert!(!prompt_matches("the is an", "the is an"));
        assert!(prompt_matches("Explain the photoelectric effect", "side effects"));
    }

    #[test]
    fn sample_prompt_lookup() {
        assert_eq!(
            sample_prompt("photoelectric"),
            Some("Explain the photoelectric effect")
        );
        assert!(sample_prompt("entropy").is_none());
    }

    #[test]
    fn helper_prefixes() {
        assert_eq!(PromptHelper::Calculate.prefix(), "Calculate the ");
        assert_eq!(
            PromptHelper::Compare.prefix(),
            "What is the difference between "
        );
    }
}
