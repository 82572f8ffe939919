//! Static exam catalog: subjects, topics, sample questions and canned chat answers.
//!
//! The catalog is built once per process ([`Catalog::builtin`]) and never
//! mutated. Lookups that take an optional exam fall back to the union across
//! all exams, preserving first-seen order.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::question::{Difficulty, Question, QuestionOrigin, QuestionType};

pub const APP_NAME: &str = "Bodhak AI";
pub const TAGLINE: &str = "Master NEET & JEE with AI-Powered Learning";

/// Headline figures shown on an exam card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamStats {
    pub total_questions: String,
    pub previous_year_papers: String,
    pub mock_tests: String,
    pub study_hours: String,
}

/// One exam with its ordered subjects and per-subject topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSpec {
    pub id: String,
    pub subjects: Vec<String>,
    pub topics_by_subject: HashMap<String, Vec<String>>,
    pub stats: ExamStats,
}

impl ExamSpec {
    /// Topics for `subject` in this exam, empty if the subject is not offered.
    pub fn topics(&self, subject: &str) -> &[String] {
        self.topics_by_subject
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Whether this exam offers `topic` under `subject`.
    pub fn offers(&self, subject: &str, topic: &str) -> bool {
        self.topics(subject).iter().any(|t| t == topic)
    }
}

/// A canned chat answer keyed by the sample prompt it was written for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CannedAnswer {
    pub prompt: String,
    pub answer: String,
    pub sources: Vec<String>,
}

/// Reference data for the whole application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub exams: Vec<ExamSpec>,
    /// Sample questions in catalog order.
    pub questions: Vec<Question>,
    /// Canned answers in priority order.
    pub canned_answers: Vec<CannedAnswer>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(build_builtin);

impl Catalog {
    /// The built-in NEET/JEE catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Look up an exam by id, ignoring ASCII case.
    pub fn exam(&self, id: &str) -> Option<&ExamSpec> {
        self.exams.iter().find(|e| e.id.eq_ignore_ascii_case(id))
    }

    pub fn exam_ids(&self) -> impl Iterator<Item = &str> {
        self.exams.iter().map(|e| e.id.as_str())
    }

    /// Subjects offered by `exam`, or by any exam when `exam` is `None` or unknown.
    pub fn subjects(&self, exam: Option<&str>) -> Vec<&str> {
        if let Some(spec) = exam.and_then(|id| self.exam(id)) {
            return spec.subjects.iter().map(String::as_str).collect();
        }
        let mut out: Vec<&str> = Vec::new();
        for spec in &self.exams {
            for subject in &spec.subjects {
                if !out.contains(&subject.as_str()) {
                    out.push(subject);
                }
            }
        }
        out
    }

    /// Topics for `subject`.
    ///
    /// Uses the selected exam's list when it offers the subject; otherwise
    /// merges the lists of every exam that does, de-duplicated in order.
    pub fn topics(&self, exam: Option<&str>, subject: &str) -> Vec<&str> {
        if let Some(spec) = exam.and_then(|id| self.exam(id))
            && spec.has_subject(subject)
        {
            return spec.topics(subject).iter().map(String::as_str).collect();
        }
        debug!(subject, "merging topics across exams");
        let mut out: Vec<&str> = Vec::new();
        for spec in &self.exams {
            for topic in spec.topics(subject) {
                if !out.contains(&topic.as_str()) {
                    out.push(topic);
                }
            }
        }
        out
    }

    /// Sample questions for `subject`, in catalog order.
    pub fn questions_for_subject<'a>(
        &'a self,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| q.subject == subject)
    }

    /// The exam that offers `topic` under `subject`.
    ///
    /// `preferred` wins when it offers the pair; otherwise the first exam in
    /// catalog order that does.
    pub fn offering_exam(
        &self,
        subject: &str,
        topic: &str,
        preferred: Option<&str>,
    ) -> Option<&ExamSpec> {
        if let Some(spec) = preferred.and_then(|id| self.exam(id))
            && spec.offers(subject, topic)
        {
            return Some(spec);
        }
        self.exams.iter().find(|e| e.offers(subject, topic))
    }
}

// ── Built-in data ──

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn exam(
    id: &str,
    topics: &[(&str, &[&str])],
    stats: [&str; 4],
) -> ExamSpec {
    ExamSpec {
        id: id.to_string(),
        subjects: topics.iter().map(|(s, _)| s.to_string()).collect(),
        topics_by_subject: topics
            .iter()
            .map(|(s, t)| (s.to_string(), strings(t)))
            .collect(),
        stats: ExamStats {
            total_questions: stats[0].to_string(),
            previous_year_papers: stats[1].to_string(),
            mock_tests: stats[2].to_string(),
            study_hours: stats[3].to_string(),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: u32,
    subject: &str,
    topic: &str,
    exam: &str,
    difficulty: Difficulty,
    text: &str,
    options: [&str; 4],
    correct: &str,
    explanation: &str,
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: Some(strings(&options)),
        correct_option: Some(correct.to_string()),
        explanation: explanation.to_string(),
        difficulty,
        subject: subject.to_string(),
        topic: topic.to_string(),
        exam: Some(exam.to_string()),
        kind: QuestionType::Mcq,
        origin: QuestionOrigin::Catalog,
    }
}

fn build_builtin() -> Catalog {
    let exams = vec![
        exam(
            "NEET",
            &[
                (
                    "Physics",
                    &[
                        "Mechanics",
                        "Thermodynamics",
                        "Optics",
                        "Electricity & Magnetism",
                        "Modern Physics",
                        "Waves",
                        "Gravitation",
                    ],
                ),
                (
                    "Chemistry",
                    &[
                        "Physical Chemistry",
                        "Organic Chemistry",
                        "Inorganic Chemistry",
                        "Chemical Bonding",
                        "Thermochemistry",
                        "Equilibrium",
                    ],
                ),
                (
                    "Biology",
                    &[
                        "Cell Biology",
                        "Genetics",
                        "Human Physiology",
                        "Plant Physiology",
                        "Ecology",
                        "Evolution",
                        "Molecular Biology",
                    ],
                ),
            ],
            ["75,000+", "25+ Years", "500+", "2000+"],
        ),
        exam(
            "JEE",
            &[
                (
                    "Physics",
                    &[
                        "Mechanics",
                        "Thermodynamics",
                        "Waves & Optics",
                        "Electricity & Magnetism",
                        "Modern Physics",
                        "Rotational Motion",
                    ],
                ),
                (
                    "Chemistry",
                    &[
                        "Physical Chemistry",
                        "Organic Chemistry",
                        "Inorganic Chemistry",
                        "Chemical Kinetics",
                        "Electrochemistry",
                    ],
                ),
                (
                    "Mathematics",
                    &[
                        "Algebra",
                        "Calculus",
                        "Coordinate Geometry",
                        "Trigonometry",
                        "Probability & Statistics",
                        "Vectors",
                        "Complex Numbers",
                    ],
                ),
            ],
            ["80,000+", "30+ Years", "600+", "2500+"],
        ),
    ];

    let questions = vec![
        sample(
            1,
            "Physics",
            "Mechanics",
            "NEET",
            Difficulty::Medium,
            "A ball is thrown vertically upward with initial velocity 20 m/s. Find the maximum height reached.",
            ["15 m", "20 m", "25 m", "30 m"],
            "20 m",
            "Using v² = u² - 2gh, at max height v=0, so h = u²/2g = 400/20 = 20m",
        ),
        sample(
            2,
            "Physics",
            "Thermodynamics",
            "JEE",
            Difficulty::Medium,
            "What is the efficiency of a Carnot engine operating between 400K and 300K?",
            ["25%", "30%", "35%", "40%"],
            "25%",
            "Efficiency = 1 - T₂/T₁ = 1 - 300/400 = 0.25 or 25%",
        ),
        sample(
            3,
            "Chemistry",
            "Physical Chemistry",
            "NEET",
            Difficulty::Easy,
            "Calculate the pH of 0.01 M HCl solution.",
            ["1", "2", "12", "14"],
            "2",
            "For strong acid, pH = -log[H+] = -log(0.01) = 2",
        ),
        sample(
            4,
            "Chemistry",
            "Organic Chemistry",
            "JEE",
            Difficulty::Medium,
            "Which of the following is an example of nucleophilic substitution?",
            [
                "Hydrolysis of alkyl halides",
                "Dehydration of alcohols",
                "Oxidation of aldehydes",
                "Reduction of ketones",
            ],
            "Hydrolysis of alkyl halides",
            "Nucleophiles attack electron-deficient carbon in alkyl halides",
        ),
        sample(
            5,
            "Biology",
            "Cell Biology",
            "NEET",
            Difficulty::Easy,
            "What is the primary function of mitochondria?",
            [
                "Protein synthesis",
                "ATP production",
                "DNA replication",
                "Waste removal",
            ],
            "ATP production",
            "Mitochondria are the powerhouses of cells, producing ATP through cellular respiration",
        ),
        sample(
            6,
            "Mathematics",
            "Calculus",
            "JEE",
            Difficulty::Medium,
            "Find the derivative of sin(x²) with respect to x",
            ["cos(x²)", "2x cos(x²)", "sin(2x)", "2x sin(x²)"],
            "2x cos(x²)",
            "Using chain rule: d/dx[sin(x²)] = cos(x²) × 2x = 2x cos(x²)",
        ),
    ];

    let canned_answers = vec![
        CannedAnswer {
            prompt: "What is the difference between mitosis and meiosis?".into(),
            answer: "Mitosis and meiosis are both cell division processes but serve different purposes:\n\n\
**Mitosis:**\n- Produces 2 identical diploid cells\n- Purpose: Growth and repair\n- 1 division cycle\n- Chromosome number remains same\n\n\
**Meiosis:**\n- Produces 4 genetically different haploid gametes\n- Purpose: Sexual reproduction\n- 2 division cycles\n- Chromosome number reduces to half\n\n\
This is crucial for NEET Biology as it appears frequently in genetics questions."
                .into(),
            sources: strings(&["NCERT Biology Class 11 Chapter 10", "Previous Year NEET 2023"]),
        },
        CannedAnswer {
            prompt: "Explain the photoelectric effect".into(),
            answer: "The photoelectric effect demonstrates the particle nature of light and was explained by Einstein:\n\n\
**Key Points:**\n- When light hits a metal surface, electrons are emitted\n- Energy of emitted electrons depends on frequency, not intensity\n- Below threshold frequency, no electrons are emitted\n\n\
**Einstein's Equation:** E = hf - φ\nWhere:\n- E = Kinetic energy of emitted electron\n- h = Planck's constant\n- f = Frequency of incident light\n- φ = Work function of metal\n\n\
This concept is important for JEE Physics Modern Physics section."
                .into(),
            sources: strings(&["Physics NCERT Class 12 Chapter 11", "JEE Main 2024 Paper"]),
        },
    ];

    Catalog {
        exams,
        questions,
        canned_answers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_two_exams() {
        let catalog = Catalog::builtin();
        let ids: Vec<_> = catalog.exam_ids().collect();
        assert_eq!(ids, vec!["NEET", "JEE"]);
    }

    #[test]
    fn exam_lookup_ignores_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.exam("neet").unwrap().id, "NEET");
        assert!(catalog.exam("GATE").is_none());
    }

    #[test]
    fn every_sample_question_is_offered_by_its_exam() {
        let catalog = Catalog::builtin();
        for q in &catalog.questions {
            let exam_id = q.exam.as_deref().expect("catalog question has exam");
            let spec = catalog.exam(exam_id).expect("exam exists");
            assert!(
                spec.offers(&q.subject, &q.topic),
                "{} / {} not offered by {}",
                q.subject,
                q.topic,
                exam_id
            );
        }
    }

    #[test]
    fn subjects_for_selected_exam() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.subjects(Some("JEE")),
            vec!["Physics", "Chemistry", "Mathematics"]
        );
    }

    #[test]
    fn subjects_union_without_exam() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.subjects(None),
            vec!["Physics", "Chemistry", "Biology", "Mathematics"]
        );
    }

    #[test]
    fn topics_use_selected_exam_when_offered() {
        let catalog = Catalog::builtin();
        let topics = catalog.topics(Some("JEE"), "Physics");
        assert_eq!(topics.len(), 6);
        assert!(topics.contains(&"Rotational Motion"));
        assert!(!topics.contains(&"Optics"));
    }

    #[test]
    fn topics_merge_across_exams() {
        let catalog = Catalog::builtin();
        let topics = catalog.topics(None, "Physics");
        // 7 NEET topics + 2 JEE-only topics.
        assert_eq!(topics.len(), 9);
        assert_eq!(topics[0], "Mechanics");
        assert_eq!(
            topics.iter().filter(|t| **t == "Mechanics").count(),
            1,
            "shared topics appear once"
        );
    }

    #[test]
    fn topics_fall_back_when_exam_lacks_subject() {
        let catalog = Catalog::builtin();
        let topics = catalog.topics(Some("NEET"), "Mathematics");
        assert!(topics.contains(&"Calculus"));
    }

    #[test]
    fn questions_for_subject_in_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<_> = catalog
            .questions_for_subject("Physics")
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(catalog.questions_for_subject("History").count(), 0);
    }

    #[test]
    fn offering_exam_prefers_selected() {
        let catalog = Catalog::builtin();
        let spec = catalog
            .offering_exam("Physics", "Mechanics", Some("JEE"))
            .unwrap();
        assert_eq!(spec.id, "JEE");

        let spec = catalog
            .offering_exam("Physics", "Optics", Some("JEE"))
            .unwrap();
        assert_eq!(spec.id, "NEET");

        assert!(catalog.offering_exam("Physics", "General", None).is_none());
    }
}
