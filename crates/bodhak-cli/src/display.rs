//! Terminal rendering: question cards, exam cards, documents, progress charts
//! and notifications.

use std::fmt::Write;

use bodhak_ai::ChatReply;
use bodhak_core::progress::WEEK_LABELS;
use bodhak_core::{DocumentEntry, ExamSpec, ProgressSnapshot, Question};
use bodhak_session::{Notification, Severity};

const LABEL_WIDTH: usize = 20;
const BAR_WIDTH: usize = 40;
const CHART_HEIGHT: u8 = 5;

// ── Exams ──

pub fn print_exam_card(spec: &ExamSpec) {
    println!("=== {} ===", spec.id);
    println!("  {:<LABEL_WIDTH$} {}", "Questions", spec.stats.total_questions);
    println!("  {:<LABEL_WIDTH$} {}", "Previous papers", spec.stats.previous_year_papers);
    println!("  {:<LABEL_WIDTH$} {}", "Mock tests", spec.stats.mock_tests);
    println!("  {:<LABEL_WIDTH$} {}", "Study hours", spec.stats.study_hours);
    println!("  {:<LABEL_WIDTH$} {}", "Subjects", spec.subjects.join(", "));
    println!();
}

// ── Practice ──

/// One practice question as a numbered card.
pub fn render_question(number: usize, q: &Question, explain: bool) -> String {
    let mut out = String::new();
    let origin = if q.is_synthetic() { " · generated" } else { "" };
    let _ = writeln!(
        out,
        "=== Question {number} [{} · {} · {}{origin}] ===",
        q.difficulty,
        q.topic,
        q.kind.label()
    );
    let _ = writeln!(out, "{}", q.text);

    if let Some(options) = &q.options {
        for (i, option) in options.iter().enumerate() {
            let letter = char::from(b'A' + (i as u8 % 26));
            let _ = writeln!(out, "  {letter}. {option}");
        }
    }

    if explain {
        if let Some(correct) = &q.correct_option {
            let _ = writeln!(out, "  {:<LABEL_WIDTH$} {correct}", "Answer");
        }
        let _ = writeln!(out, "  {:<LABEL_WIDTH$} {}", "Explanation", q.explanation);
    }
    out
}

pub fn print_questions(questions: &[Question], explain: bool) {
    for (i, q) in questions.iter().enumerate() {
        println!("{}", render_question(i + 1, q, explain));
    }
}

// ── Chat ──

pub fn print_reply(reply: &ChatReply) {
    println!("{}", reply.text);
    if !reply.sources.is_empty() {
        println!();
        println!("Sources: {}", reply.sources.join(" · "));
    }
    println!();
}

// ── Documents ──

pub fn render_documents(docs: &[DocumentEntry]) -> String {
    if docs.is_empty() {
        return "No documents.\n".to_string();
    }
    let name_width = docs.iter().map(|d| d.name.len()).max().unwrap_or(0).max(4);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<10}  {:>9}  {:<10}  {}",
        "Name", "Status", "Size", "Uploaded", "Type"
    );
    for d in docs {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<10}  {:>9}  {:<10}  {}",
            d.name,
            d.status.as_str(),
            d.size,
            d.upload_date,
            d.kind
        );
    }
    out
}

// ── Progress ──

/// Horizontal bar scaled to `max`.
pub fn bar(value: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (value.min(max) as usize * width).div_ceil(max as usize);
    "█".repeat(filled)
}

/// Weekly progress as a text column chart, one row per 20 points.
pub fn render_weekly_chart(weekly: &[u8; 7]) -> String {
    let mut out = String::new();
    for row in (1..=CHART_HEIGHT).rev() {
        let threshold = row * (100 / CHART_HEIGHT);
        let _ = write!(out, "{threshold:>4} │");
        for &v in weekly {
            let _ = write!(out, " {}  ", if v >= threshold { "██" } else { "  " });
        }
        out.push('\n');
    }
    let _ = write!(out, "     └");
    out.push_str(&"─".repeat(weekly.len() * 5));
    out.push('\n');
    let _ = write!(out, "      ");
    for label in WEEK_LABELS {
        let _ = write!(out, "{label:<5}");
    }
    out.push('\n');
    out
}

pub fn print_progress(p: &ProgressSnapshot) {
    println!("=== Progress ===");
    println!("  {:<LABEL_WIDTH$} {}", "Questions answered", p.questions_answered);
    println!("  {:<LABEL_WIDTH$} {}", "Topics covered", p.topics_covered);
    println!("  {:<LABEL_WIDTH$} {}", "Time spent", p.time_spent);
    println!("  {:<LABEL_WIDTH$} {}%", "Accuracy", p.accuracy);
    println!();

    println!("Weekly progress (avg {}%)", p.weekly_average());
    print!("{}", render_weekly_chart(&p.weekly_progress));
    println!();

    println!("Subject accuracy");
    for s in &p.subject_wise {
        println!(
            "  {:<12} {:<BAR_WIDTH$} {:>3}%  {}h, {} topics",
            s.subject,
            bar(s.accuracy.into(), 100, BAR_WIDTH),
            s.accuracy,
            s.time_spent,
            s.topics_completed
        );
    }
    println!();

    println!("Recent activity");
    for a in &p.recent_activity {
        println!("  {:<40} {}", a.description(), a.time());
    }
}

// ── Notifications ──

pub fn render_notification(n: &Notification) -> String {
    let tag = match n.severity {
        Severity::Info => "[info]",
        Severity::Success => "[ok]",
        Severity::Error => "[error]",
        Severity::Warning => "[warn]",
    };
    format!("{tag:>7} {}", n.message)
}

/// Print and discard every queued notification.
pub fn flush_notifications(notifications: Vec<Notification>) {
    for n in notifications {
        println!("{}", render_notification(&n));
    }
}
