// Colored terminal output for verdicts and smoke-test results.

use colored::{ColoredString, Colorize};

use crate::classifier::keywords::KeywordAnalysis;
use crate::classifier::traits::{Prediction, Verdict};

/// Display a single verdict with its color.
pub fn display_verdict(verdict: &Verdict, method: Option<&str>) {
    println!(
        "Prediction: {}",
        colorize_prediction(verdict.prediction).bold()
    );
    println!("Confidence: {:.2}%", verdict.confidence);
    if let Some(method) = method {
        println!("Method: {}", method.dimmed());
    }
}

/// Show which phrases drove a keyword verdict.
pub fn display_keyword_hits(analysis: &KeywordAnalysis) {
    println!(
        "\nAlarmist phrases ({}): {}",
        analysis.fake_score(),
        join_or_none(&analysis.alarmist_hits).red()
    );
    println!(
        "Evidentiary phrases ({}): {}",
        analysis.real_score(),
        join_or_none(&analysis.evidentiary_hits).green()
    );
}

/// Section header used by the smoke test.
pub fn display_header(title: &str) {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("{}", title.bold());
    println!("{rule}");
}

pub fn colorize_prediction(prediction: Prediction) -> ColoredString {
    match prediction.color() {
        "red" => prediction.as_str().red(),
        _ => prediction.as_str().green(),
    }
}

/// Same as colorize_prediction, for labels that come back over HTTP.
pub fn colorize_label(label: &str) -> ColoredString {
    match label {
        "Fake News" => colorize_prediction(Prediction::Fake),
        "Real News" => colorize_prediction(Prediction::Real),
        other => other.normal(),
    }
}

fn join_or_none(phrases: &[&str]) -> String {
    if phrases.is_empty() {
        "none".to_string()
    } else {
        phrases.join(", ")
    }
}
