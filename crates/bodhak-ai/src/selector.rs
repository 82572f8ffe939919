//! Practice-question selection with synthetic top-up.
//!
//! Catalog questions matching the filter come first, in catalog order. When
//! fewer than [`desired_count`] match, the remainder is generated from
//! per-subject string templates with a random integer substituted in.
//!
//! The random source is injected so callers can seed it; the same seed and
//! filter always produce the same sequence.

use bodhak_core::{Catalog, Difficulty, Question, QuestionOrigin, QuestionType};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Fewest questions a request ever returns.
pub const MIN_QUESTIONS: usize = 3;
/// Most questions a request ever returns.
pub const MAX_QUESTIONS: usize = 5;

/// Topic used when the request leaves it blank.
pub const GENERIC_TOPIC: &str = "General";
const GENERIC_TOPIC_PHRASE: &str = "the given concept";

/// Selection criteria for a practice set.
///
/// `subject` is required. The other criteria are optional and blank values
/// count as unset. `exam` does not filter catalog questions; it only decides
/// which exam a synthetic question is attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeFilter {
    pub subject: String,
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub kind: Option<QuestionType>,
    pub exam: Option<String>,
}

impl PracticeFilter {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        self.topic = (!topic.trim().is_empty()).then_some(topic);
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn kind(mut self, kind: QuestionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn exam(mut self, exam: impl Into<String>) -> Self {
        self.exam = Some(exam.into());
        self
    }

    fn topic_str(&self) -> Option<&str> {
        self.topic.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Whether a catalog question satisfies every set criterion exactly.
    pub fn matches(&self, question: &Question) -> bool {
        if question.subject != self.subject {
            return false;
        }
        if let Some(topic) = self.topic_str()
            && question.topic != topic
        {
            return false;
        }
        if let Some(difficulty) = self.difficulty
            && question.difficulty != difficulty
        {
            return false;
        }
        if let Some(kind) = self.kind
            && question.kind != kind
        {
            return false;
        }
        true
    }
}

/// Size of a practice set given how many catalog questions matched.
pub fn desired_count(matched: usize) -> usize {
    (matched + 2).clamp(MIN_QUESTIONS, MAX_QUESTIONS)
}

/// Select a practice set for `filter`.
///
/// Never fails: an unknown subject simply matches nothing and the whole set
/// is synthetic.
pub fn select_questions<R: Rng + ?Sized>(
    catalog: &Catalog,
    filter: &PracticeFilter,
    rng: &mut R,
) -> Vec<Question> {
    let matched: Vec<&Question> = catalog
        .questions_for_subject(&filter.subject)
        .filter(|q| filter.matches(q))
        .collect();
    let total = desired_count(matched.len());

    debug!(
        subject = %filter.subject,
        matched = matched.len(),
        total,
        "selecting practice questions"
    );

    (0..total)
        .map(|i| match matched.get(i) {
            Some(q) => (*q).clone(),
            None => synthesize(catalog, filter, i + 1, rng),
        })
        .collect()
}

/// Templates for a subject. Subjects without their own set borrow Physics.
pub fn templates_for(subject: &str) -> &'static [&'static str] {
    match subject {
        "Chemistry" => &[
            "Calculate the molarity of a solution containing {value} moles in 500 mL.",
            "Find the pH of {value} × 10⁻³ M HCl solution.",
            "Determine the number of atoms in {value} moles of carbon.",
            "What is the oxidation state of sulfur in H₂SO₄?",
        ],
        "Biology" => &[
            "Explain the process of {topic} in cellular metabolism.",
            "What are the main functions of {topic} in living organisms?",
            "Describe the structure and function of {topic}.",
            "How does {topic} contribute to maintaining homeostasis?",
        ],
        "Mathematics" => &[
            "Find the derivative of f(x) = x^{value} + 2x + 1.",
            "Calculate the integral of sin({value}x) dx.",
            "Solve the equation: x² + {value}x + 6 = 0",
            "Find the limit as x approaches 0 of (sin {value}x)/x",
        ],
        _ => &[
            "A particle moves with velocity v = {value} m/s. Calculate its kinetic energy if mass = 2 kg.",
            "Find the force required to accelerate a {value} kg object at 5 m/s².",
            "Calculate the electric field intensity at distance r = {value} m from a point charge.",
            "A spring with constant k = {value} N/m is compressed by 0.2 m. Find the stored energy.",
        ],
    }
}

/// Build one templated filler question, numbered from 1 within its set.
///
/// For multiple choice the four options are multiples of the drawn value and
/// the first is marked correct. The options are placeholders and carry no
/// arithmetic relationship to the question.
pub fn synthesize<R: Rng + ?Sized>(
    catalog: &Catalog,
    filter: &PracticeFilter,
    number: usize,
    rng: &mut R,
) -> Question {
    let templates = templates_for(&filter.subject);
    let template = templates.choose(rng).copied().unwrap_or(templates[0]);
    let value: u32 = rng.gen_range(1..=10);

    let topic_phrase = filter.topic_str().unwrap_or(GENERIC_TOPIC_PHRASE);
    let text = template
        .replace("{value}", &value.to_string())
        .replace("{topic}", topic_phrase);

    let difficulty = filter.difficulty.unwrap_or_default();
    let kind = filter.kind.unwrap_or_default();
    let topic = filter.topic_str().unwrap_or(GENERIC_TOPIC).to_string();

    let options = (kind == QuestionType::Mcq)
        .then(|| (2..=5).map(|k| format!("{} units", value * k)).collect::<Vec<_>>());
    let correct_option = options.as_ref().and_then(|o| o.first().cloned());

    let explanation = format!(
        "This is a {} level question from {}. The solution involves applying \
         fundamental principles and formulas relevant to this topic.",
        difficulty.as_str().to_lowercase(),
        filter.topic_str().unwrap_or(&filter.subject),
    );

    let exam = catalog
        .offering_exam(&filter.subject, &topic, filter.exam.as_deref())
        .map(|spec| spec.id.clone());

    Question {
        id: format!("synthetic_{number}"),
        text,
        options,
        correct_option,
        explanation,
        difficulty,
        subject: filter.subject.clone(),
        topic,
        exam,
        kind,
        origin: QuestionOrigin::Synthetic,
    }
}
