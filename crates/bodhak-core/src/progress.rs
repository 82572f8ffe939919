//! Static progress dataset backing the analytics view.

use serde::{Deserialize, Serialize};

/// Day labels for [`ProgressSnapshot::weekly_progress`].
pub const WEEK_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject: String,
    /// Percentage, 0–100.
    pub accuracy: u8,
    /// Hours.
    pub time_spent: u32,
    pub topics_completed: u32,
}

/// An entry in the recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activity {
    Question {
        subject: String,
        topic: String,
        time: String,
    },
    Chat {
        query: String,
        time: String,
    },
    Practice {
        subject: String,
        count: u32,
        time: String,
    },
    Upload {
        document: String,
        time: String,
    },
}

impl Activity {
    pub fn description(&self) -> String {
        match self {
            Self::Question { subject, topic, .. } => {
                format!("Solved {subject} question on {topic}")
            }
            Self::Chat { query, .. } => format!("Asked: \"{query}\""),
            Self::Practice { subject, count, .. } => {
                format!("Completed {count} {subject} questions")
            }
            Self::Upload { document, .. } => format!("Uploaded document: {document}"),
        }
    }

    /// Relative time label, e.g. `2 hours ago`.
    pub fn time(&self) -> &str {
        match self {
            Self::Question { time, .. }
            | Self::Chat { time, .. }
            | Self::Practice { time, .. }
            | Self::Upload { time, .. } => time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub questions_answered: u32,
    pub topics_covered: u32,
    pub time_spent: String,
    /// Overall accuracy percentage.
    pub accuracy: u8,
    /// Daily study progress percentages, Monday first.
    pub weekly_progress: [u8; 7],
    pub subject_wise: Vec<SubjectProgress>,
    pub recent_activity: Vec<Activity>,
}

impl ProgressSnapshot {
    /// The demo learner's progress.
    pub fn sample() -> Self {
        let subject = |name: &str, accuracy, time_spent, topics_completed| SubjectProgress {
            subject: name.to_string(),
            accuracy,
            time_spent,
            topics_completed,
        };
        Self {
            questions_answered: 2847,
            topics_covered: 45,
            time_spent: "247 hours".into(),
            accuracy: 82,
            weekly_progress: [68, 74, 71, 85, 78, 83, 87],
            subject_wise: vec![
                subject("Physics", 78, 89, 15),
                subject("Chemistry", 85, 92, 18),
                subject("Biology", 83, 66, 12),
            ],
            recent_activity: vec![
                Activity::Question {
                    subject: "Physics".into(),
                    topic: "Thermodynamics".into(),
                    time: "2 hours ago".into(),
                },
                Activity::Chat {
                    query: "Explain entropy".into(),
                    time: "4 hours ago".into(),
                },
                Activity::Practice {
                    subject: "Chemistry".into(),
                    count: 15,
                    time: "1 day ago".into(),
                },
                Activity::Upload {
                    document: "Biology Notes.pdf".into(),
                    time: "2 days ago".into(),
                },
            ],
        }
    }

    /// Mean of the weekly progress series, rounded down.
    pub fn weekly_average(&self) -> u8 {
        let sum: u32 = self.weekly_progress.iter().map(|&v| v as u32).sum();
        (sum / self.weekly_progress.len() as u32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_descriptions() {
        let snapshot = ProgressSnapshot::sample();
        let lines: Vec<String> = snapshot
            .recent_activity
            .iter()
            .map(Activity::description)
            .collect();
        assert_eq!(lines[0], "Solved Physics question on Thermodynamics");
        assert_eq!(lines[1], "Asked: \"Explain entropy\"");
        assert_eq!(lines[2], "Completed 15 Chemistry questions");
        assert_eq!(lines[3], "Uploaded document: Biology Notes.pdf");
        assert_eq!(snapshot.recent_activity[3].time(), "2 days ago");
    }

    #[test]
    fn weekly_average_of_sample() {
        // (68+74+71+85+78+83+87) / 7 = 546 / 7 = 78
        assert_eq!(ProgressSnapshot::sample().weekly_average(), 78);
    }

    #[test]
    fn activity_serializes_with_type_tag() {
        let json = serde_json::to_value(&ProgressSnapshot::sample().recent_activity[2]).unwrap();
        assert_eq!(json["type"], "practice");
        assert_eq!(json["count"], 15);
    }
}
