//! The session context: everything one learner's run keeps in memory.

use bodhak_ai::{ChatResponder, PracticeFilter, select_questions};
use bodhak_core::{Catalog, DocumentEntry, Question, UploadStatus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::conversation::{ChatExchange, Conversation};
use crate::error::{SessionError, UploadError};
use crate::notify::Notifications;
use crate::upload::{FileSubmission, UploadEvent, UploadId, UploadManager, UploadTimings};

pub const WELCOME: &str = "Welcome to Bodhak AI! Start by selecting your target exam.";

/// Session state owned by the UI layer.
///
/// Holds the selected exam, the chat transcript, the document library with
/// its in-flight uploads, and the notification queue. Upload completions
/// are picked up by [`pump_upload_events`](Self::pump_upload_events).
pub struct Session<'c> {
    catalog: &'c Catalog,
    exam: Option<String>,
    conversation: Conversation,
    uploads: UploadManager,
    upload_events: broadcast::Receiver<UploadEvent>,
    notifications: Notifications,
    rng: StdRng,
}

impl<'c> Session<'c> {
    /// A session over `catalog` with the seeded document library.
    pub fn new(catalog: &'c Catalog, timings: UploadTimings) -> Self {
        Self::with_rng(catalog, timings, StdRng::from_entropy())
    }

    /// Like [`new`](Self::new) with a fixed seed for practice generation.
    pub fn seeded(catalog: &'c Catalog, timings: UploadTimings, seed: u64) -> Self {
        Self::with_rng(catalog, timings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: &'c Catalog, timings: UploadTimings, rng: StdRng) -> Self {
        let uploads = UploadManager::with_library(timings, DocumentEntry::seeded());
        let upload_events = uploads.subscribe();
        Self {
            catalog,
            exam: None,
            conversation: Conversation::new(),
            uploads,
            upload_events,
            notifications: Notifications::default(),
            rng,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn exam(&self) -> Option<&str> {
        self.exam.as_deref()
    }

    /// Select the target exam by (case-insensitive) id.
    pub fn select_exam(&mut self, id: &str) -> Result<&str, SessionError> {
        let catalog = self.catalog;
        let Some(spec) = catalog.exam(id) else {
            self.notifications.error(format!("Unknown exam: {id}"));
            return Err(SessionError::UnknownExam(id.to_string()));
        };
        info!(exam = %spec.id, "exam selected");
        self.notifications.success(format!(
            "{} exam selected successfully! Ready to start learning.",
            spec.id
        ));
        Ok(self.exam.insert(spec.id.clone()).as_str())
    }

    /// Build a practice set. An empty subject is refused with an error
    /// notification; anything else always yields 3 to 5 questions.
    pub fn generate_practice(
        &mut self,
        mut filter: PracticeFilter,
    ) -> Result<Vec<Question>, SessionError> {
        if filter.subject.trim().is_empty() {
            let err = SessionError::MissingSelection("subject");
            self.notifications.error(err.to_string());
            return Err(err);
        }
        if filter.exam.is_none() {
            filter.exam = self.exam.clone();
        }
        let questions = select_questions(self.catalog, &filter, &mut self.rng);
        debug!(subject = %filter.subject, count = questions.len(), "practice set built");
        self.notifications.success("Questions generated successfully!");
        Ok(questions)
    }

    /// Ask the tutor, using the selected exam as context.
    pub fn ask(&mut self, message: &str) -> Result<&ChatExchange, SessionError> {
        let responder = ChatResponder::new(self.catalog);
        self.conversation
            .ask(&responder, message, self.exam.as_deref())
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Reset the transcript. Returns the greeting that replaces it.
    pub fn clear_chat(&mut self) -> String {
        let greeting = self.conversation.clear(self.exam.as_deref());
        self.notifications.info("Chat history cleared!");
        greeting
    }

    /// Start uploading a file. Rejections raise an error notification.
    pub fn submit_upload(&mut self, file: FileSubmission) -> Result<UploadId, UploadError> {
        let name = file.file_name.clone();
        match self.uploads.submit(file) {
            Ok(id) => {
                self.notifications.info(format!("Started uploading: {name}"));
                Ok(id)
            }
            Err(err) => {
                self.notifications.error(err.to_string());
                Err(err)
            }
        }
    }

    pub fn cancel_upload(&mut self, id: UploadId) -> Result<(), UploadError> {
        let record = self.uploads.cancel(id)?;
        self.notifications
            .warning(format!("Upload cancelled: {}", record.file_name));
        Ok(())
    }

    pub fn uploads(&self) -> &UploadManager {
        &self.uploads
    }

    /// Turn queued upload events into notifications. Returns the events seen.
    pub fn pump_upload_events(&mut self) -> Vec<UploadEvent> {
        let mut seen = Vec::new();
        loop {
            match self.upload_events.try_recv() {
                Ok(event) => {
                    if let UploadEvent::Transition {
                        file_name,
                        status: UploadStatus::Processed,
                        ..
                    } = &event
                    {
                        self.notifications
                            .success(format!("{file_name} processed successfully!"));
                    }
                    seen.push(event);
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "upload events lagged");
                }
                Err(_) => return seen,
            }
        }
    }

    /// Library rows (in-flight uploads first), optionally filtered by status.
    pub fn documents(&self, status: Option<UploadStatus>) -> Vec<DocumentEntry> {
        self.uploads.listing(status)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use bodhak_core::document::MIME_PDF;

    fn session() -> Session<'static> {
        Session::seeded(Catalog::builtin(), UploadTimings::fast(), 7)
    }

    #[tokio::test]
    async fn exam_selection_notifies() {
        let mut s = session();
        assert_eq!(s.select_exam("neet").unwrap(), "NEET");
        assert_eq!(s.exam(), Some("NEET"));
        let last = s.notifications().last().unwrap();
        assert_eq!(last.severity, Severity::Success);
        assert_eq!(
            last.message,
            "NEET exam selected successfully! Ready to start learning."
        );

        assert!(matches!(
            s.select_exam("GATE"),
            Err(SessionError::UnknownExam(_))
        ));
        assert_eq!(s.exam(), Some("NEET"));
    }

    #[tokio::test]
    async fn missing_subject_is_an_error_notification() {
        let mut s = session();
        let err = s.generate_practice(PracticeFilter::new("  ")).unwrap_err();
        assert_eq!(err.to_string(), "Please select a subject first!");
        assert_eq!(s.notifications().last().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn practice_uses_selected_exam() {
        let mut s = session();
        s.select_exam("JEE").unwrap();
        let qs = s
            .generate_practice(PracticeFilter::new("Mathematics").topic("Calculus"))
            .unwrap();
        assert!((3..=5).contains(&qs.len()));
        assert!(qs.iter().all(|q| q.exam.as_deref() == Some("JEE")));
        assert_eq!(
            s.notifications().last().unwrap().message,
            "Questions generated successfully!"
        );
    }

    #[tokio::test]
    async fn chat_goes_through_conversation() {
        let mut s = session();
        s.ask("photoelectric effect").unwrap();
        assert_eq!(s.conversation().len(), 1);
        assert!(s.ask("").is_err());

        s.select_exam("NEET").unwrap();
        assert_eq!(
            s.clear_chat(),
            "Chat cleared! How can I help you with your NEET preparation?"
        );
        assert!(s.conversation().is_empty());
        assert_eq!(s.notifications().last().unwrap().message, "Chat history cleared!");
    }

    #[tokio::test(start_paused = true)]
    async fn upload_completion_is_announced() {
        let mut s = session();
        s.submit_upload(FileSubmission::new("notes.pdf", 1024, MIME_PDF))
            .unwrap();
        assert_eq!(
            s.notifications().last().unwrap().message,
            "Started uploading: notes.pdf"
        );

        s.uploads().wait_until_idle().await;
        let events = s.pump_upload_events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            s.notifications().last().unwrap().message,
            "notes.pdf processed successfully!"
        );
        assert_eq!(s.documents(None)[0].name, "notes.pdf");
    }

    #[tokio::test]
    async fn rejected_upload_is_an_error_notification() {
        let mut s = session();
        assert!(
            s.submit_upload(FileSubmission::new("pic.png", 10, "image/png"))
                .is_err()
        );
        let last = s.notifications().last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert_eq!(last.message, "Unsupported file type: pic.png");
        assert_eq!(s.documents(None).len(), 4);
    }
}
