//! Local persisted state: the learner's theme preference.

mod error;
pub mod prefs;

pub use error::StoreError;
pub use prefs::{PreferenceStore, Preferences, Theme};
