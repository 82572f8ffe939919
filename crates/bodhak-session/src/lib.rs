//! Session context for Bodhak: selected exam, chat transcript, notifications
//! and the timer-driven document upload lifecycle.

pub mod conversation;
mod error;
pub mod notify;
pub mod session;
pub mod upload;

pub use conversation::{ChatExchange, Conversation};
pub use error::{SessionError, UploadError};
pub use notify::{Notification, Notifications, Severity};
pub use session::{Session, WELCOME};
pub use upload::{FileSubmission, UploadEvent, UploadId, UploadManager, UploadRecord, UploadTimings};
