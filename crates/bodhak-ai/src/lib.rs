//! Simulated tutoring: practice-question selection and canned chat replies.
//!
//! Everything here is synchronous and deterministic given its inputs; any
//! "thinking" delay belongs to the caller.

pub mod chat;
pub mod selector;

pub use chat::{ChatReply, ChatResponder, PromptHelper, ReplyKind, sample_prompt};
pub use selector::{PracticeFilter, desired_count, select_questions};
