//! Simulated document upload lifecycle.
//!
//! Accepted files walk `Uploading → Processing → Processed` on fixed timers;
//! nothing is read or stored. Files with a disallowed MIME type or over
//! [`MAX_UPLOAD_BYTES`] are rejected at intake and never enter the lifecycle.
//!
//! Each accepted file gets its own tokio task. The task's abort handle lives
//! with the in-flight record, so cancelling the record (or dropping the
//! manager) stops its timers.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bodhak_core::document::{MAX_UPLOAD_BYTES, file_extension, is_allowed_mime};
use bodhak_core::{DocumentEntry, UploadStatus, format_file_size};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use crate::error::UploadError;

pub type UploadId = u64;

const EVENT_CAPACITY: usize = 64;

/// Phase delays for the simulated lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTimings {
    /// `Uploading → Processing`.
    pub upload: Duration,
    /// `Processing → Processed`.
    pub processing: Duration,
}

impl Default for UploadTimings {
    fn default() -> Self {
        Self {
            upload: Duration::from_millis(2000),
            processing: Duration::from_millis(3000),
        }
    }
}

impl UploadTimings {
    /// Short delays for scripted runs.
    pub fn fast() -> Self {
        Self {
            upload: Duration::from_millis(20),
            processing: Duration::from_millis(30),
        }
    }
}

/// A file offered for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSubmission {
    pub file_name: String,
    pub size_bytes: u64,
    /// MIME type as declared by the picker.
    pub declared_type: String,
}

impl FileSubmission {
    pub fn new(file_name: impl Into<String>, size_bytes: u64, declared_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            declared_type: declared_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRecord {
    pub id: UploadId,
    pub file_name: String,
    pub size_bytes: u64,
    pub declared_type: String,
    pub status: UploadStatus,
    pub submitted_at: DateTime<Utc>,
}

impl UploadRecord {
    fn new(id: UploadId, file: FileSubmission, status: UploadStatus) -> Self {
        Self {
            id,
            file_name: file.file_name,
            size_bytes: file.size_bytes,
            declared_type: file.declared_type,
            status,
            submitted_at: Utc::now(),
        }
    }

    /// Library row for this record in its current status.
    pub fn to_document(&self) -> DocumentEntry {
        DocumentEntry {
            name: self.file_name.clone(),
            status: self.status,
            size: format_file_size(self.size_bytes),
            upload_date: self.submitted_at.format("%Y-%m-%d").to_string(),
            kind: file_extension(&self.file_name),
        }
    }
}

/// Broadcast whenever an upload changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Transition {
        id: UploadId,
        file_name: String,
        status: UploadStatus,
    },
    Cancelled {
        id: UploadId,
        file_name: String,
    },
}

impl UploadEvent {
    pub fn id(&self) -> UploadId {
        match self {
            Self::Transition { id, .. } | Self::Cancelled { id, .. } => *id,
        }
    }
}

/// Check a submission against the intake rules. Type is checked before size.
pub fn validate(file: &FileSubmission) -> Result<(), RejectReason> {
    if !is_allowed_mime(&file.declared_type) {
        return Err(RejectReason::UnsupportedType);
    }
    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(RejectReason::TooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnsupportedType,
    TooLarge,
}

struct InFlight {
    record: UploadRecord,
    task: Option<AbortHandle>,
}

#[derive(Default)]
struct LibraryState {
    next_id: UploadId,
    in_flight: HashMap<UploadId, InFlight>,
    processed: HashSet<UploadId>,
    /// Most recent first.
    library: Vec<DocumentEntry>,
}

fn lock(state: &Mutex<LibraryState>) -> MutexGuard<'_, LibraryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the session's document library and every in-flight upload.
///
/// Must be used from within a tokio runtime: [`submit`](Self::submit) spawns
/// the phase timers.
pub struct UploadManager {
    state: Arc<Mutex<LibraryState>>,
    events: broadcast::Sender<UploadEvent>,
    timings: UploadTimings,
}

impl UploadManager {
    pub fn new(timings: UploadTimings) -> Self {
        Self::with_library(timings, Vec::new())
    }

    /// Start with an existing library, most recent first.
    pub fn with_library(timings: UploadTimings, library: Vec<DocumentEntry>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let state = LibraryState {
            next_id: 1,
            library,
            ..LibraryState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            events,
            timings,
        }
    }

    pub fn timings(&self) -> UploadTimings {
        self.timings
    }

    /// Receive every subsequent [`UploadEvent`].
    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.events.subscribe()
    }

    /// Validate `file` and, if accepted, start its lifecycle.
    ///
    /// Rejections return immediately with a `Rejected` record; nothing is
    /// queued and no event is sent.
    pub fn submit(&self, file: FileSubmission) -> Result<UploadId, UploadError> {
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;

        if let Err(reason) = validate(&file) {
            warn!(
                file = %file.file_name,
                declared_type = %file.declared_type,
                size = file.size_bytes,
                ?reason,
                "upload rejected"
            );
            let record = UploadRecord::new(id, file, UploadStatus::Rejected);
            return Err(match reason {
                RejectReason::UnsupportedType => UploadError::UnsupportedType(record),
                RejectReason::TooLarge => UploadError::TooLarge(record),
            });
        }

        let record = UploadRecord::new(id, file, UploadStatus::Uploading);
        info!(id, file = %record.file_name, size = record.size_bytes, "upload started");
        let _ = self.events.send(UploadEvent::Transition {
            id,
            file_name: record.file_name.clone(),
            status: UploadStatus::Uploading,
        });

        let task = tokio::spawn(run_lifecycle(
            Arc::clone(&self.state),
            self.events.clone(),
            self.timings,
            id,
        ));
        state.in_flight.insert(
            id,
            InFlight {
                record,
                task: Some(task.abort_handle()),
            },
        );
        Ok(id)
    }

    /// Stop an upload before it is processed and forget it.
    pub fn cancel(&self, id: UploadId) -> Result<UploadRecord, UploadError> {
        let mut state = lock(&self.state);
        let Some(entry) = state.in_flight.remove(&id) else {
            return Err(if state.processed.contains(&id) {
                UploadError::AlreadyProcessed(id)
            } else {
                UploadError::UnknownUpload(id)
            });
        };
        if let Some(task) = entry.task {
            task.abort();
        }
        info!(id, file = %entry.record.file_name, "upload cancelled");
        let _ = self.events.send(UploadEvent::Cancelled {
            id,
            file_name: entry.record.file_name.clone(),
        });
        Ok(entry.record)
    }

    /// Snapshot of an in-flight upload.
    pub fn record(&self, id: UploadId) -> Option<UploadRecord> {
        lock(&self.state)
            .in_flight
            .get(&id)
            .map(|e| e.record.clone())
    }

    pub fn status(&self, id: UploadId) -> Option<UploadStatus> {
        let state = lock(&self.state);
        match state.in_flight.get(&id) {
            Some(e) => Some(e.record.status),
            None if state.processed.contains(&id) => Some(UploadStatus::Processed),
            None => None,
        }
    }

    /// In-flight uploads, most recent first.
    pub fn in_flight(&self) -> Vec<UploadRecord> {
        let state = lock(&self.state);
        let mut records: Vec<UploadRecord> =
            state.in_flight.values().map(|e| e.record.clone()).collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }

    /// The document library, most recent first.
    pub fn documents(&self) -> Vec<DocumentEntry> {
        lock(&self.state).library.clone()
    }

    /// In-flight uploads followed by the library, optionally filtered by status.
    pub fn listing(&self, status: Option<UploadStatus>) -> Vec<DocumentEntry> {
        self.in_flight()
            .iter()
            .map(UploadRecord::to_document)
            .chain(self.documents())
            .filter(|d| status.is_none_or(|s| d.status == s))
            .collect()
    }

    /// Resolve once no upload is in flight.
    pub async fn wait_until_idle(&self) {
        let mut rx = self.events.subscribe();
        loop {
            if lock(&self.state).in_flight.is_empty() {
                return;
            }
            if let Err(broadcast::error::RecvError::Closed) = rx.recv().await {
                return;
            }
        }
    }
}

impl Drop for UploadManager {
    fn drop(&mut self) {
        let state = lock(&self.state);
        for entry in state.in_flight.values() {
            if let Some(task) = &entry.task {
                task.abort();
            }
        }
    }
}

async fn run_lifecycle(
    state: Arc<Mutex<LibraryState>>,
    events: broadcast::Sender<UploadEvent>,
    timings: UploadTimings,
    id: UploadId,
) {
    tokio::time::sleep(timings.upload).await;
    if !advance(&state, &events, id, UploadStatus::Processing) {
        return;
    }
    tokio::time::sleep(timings.processing).await;
    advance(&state, &events, id, UploadStatus::Processed);
}

/// Move an in-flight record to `next`. Returns `false` if the record is gone
/// (cancelled) or `next` is not its successor.
fn advance(
    state: &Mutex<LibraryState>,
    events: &broadcast::Sender<UploadEvent>,
    id: UploadId,
    next: UploadStatus,
) -> bool {
    let mut state = lock(state);
    let Some(entry) = state.in_flight.get_mut(&id) else {
        return false;
    };
    if entry.record.status.next() != Some(next) {
        warn!(id, from = %entry.record.status, to = %next, "refusing out-of-order transition");
        return false;
    }
    entry.record.status = next;
    let file_name = entry.record.file_name.clone();

    if next == UploadStatus::Processed {
        if let Some(done) = state.in_flight.remove(&id) {
            state.library.insert(0, done.record.to_document());
        }
        state.processed.insert(id);
    }

    info!(id, file = %file_name, status = %next, "upload advanced");
    let _ = events.send(UploadEvent::Transition {
        id,
        file_name,
        status: next,
    });
    true
}
