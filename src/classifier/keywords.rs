// Keyword heuristic scorer.
//
// Counts which "alarmist" and "evidentiary" phrases appear in the text and
// turns the ratio into a verdict. Each phrase counts at most once no matter
// how often it repeats. Matching is plain substring matching on the
// lower-cased text, so short phrases like "lie" also hit inside longer words.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{NewsClassifier, Prediction, Verdict};

/// Phrases associated with sensationalized or conspiratorial framing.
pub const ALARMIST_PHRASES: &[&str] = &[
    "breaking",
    "urgent",
    "shocking",
    "unbelievable",
    "exclusive",
    "leaked",
    "secret",
    "hidden",
    "exposed",
    "revealed",
    "conspiracy",
    "cover-up",
    "they don't want you to know",
    "mainstream media",
    "fake news",
    "hoax",
    "scam",
    "lie",
    "deception",
    "propaganda",
];

/// Phrases associated with sourced, verifiable claims.
pub const EVIDENTIARY_PHRASES: &[&str] = &[
    "according to",
    "research shows",
    "study finds",
    "experts say",
    "official statement",
    "confirmed by",
    "verified",
    "fact-checked",
    "peer-reviewed",
    "published in",
    "data shows",
    "statistics indicate",
];

/// Method name reported in API responses for this backend.
pub const KEYWORD_METHOD: &str = "Simple keyword-based analysis";

/// Verdict when no phrase from either list is present.
const NEUTRAL_CONFIDENCE: f64 = 60.0;

/// The two phrase sets the scorer matches against. Phrases must be lower-case.
#[derive(Debug, Clone, Copy)]
pub struct KeywordLists {
    pub alarmist: &'static [&'static str],
    pub evidentiary: &'static [&'static str],
}

impl Default for KeywordLists {
    fn default() -> Self {
        Self {
            alarmist: ALARMIST_PHRASES,
            evidentiary: EVIDENTIARY_PHRASES,
        }
    }
}

/// Which phrases matched a given text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordAnalysis {
    pub alarmist_hits: Vec<&'static str>,
    pub evidentiary_hits: Vec<&'static str>,
}

impl KeywordAnalysis {
    pub fn fake_score(&self) -> usize {
        self.alarmist_hits.len()
    }

    pub fn real_score(&self) -> usize {
        self.evidentiary_hits.len()
    }

    /// Turn the hit counts into a verdict.
    ///
    /// Fake wins only on a strict majority of alarmist hits; a tie reads as real.
    /// Confidence is capped at 95 for fake and 90 for real.
    pub fn verdict(&self) -> Verdict {
        let fake_score = self.fake_score();
        let total = fake_score + self.real_score();

        if total == 0 {
            return Verdict {
                prediction: Prediction::Real,
                confidence: NEUTRAL_CONFIDENCE,
            };
        }

        let fake_ratio = fake_score as f64 / total as f64;

        if fake_ratio > 0.5 {
            Verdict {
                prediction: Prediction::Fake,
                confidence: (70.0 + fake_ratio * 30.0).min(95.0),
            }
        } else {
            Verdict {
                prediction: Prediction::Real,
                confidence: (60.0 + (1.0 - fake_ratio) * 30.0).min(90.0),
            }
        }
    }
}

/// Find the distinct phrases from each list that occur in `text`.
pub fn analyze(text: &str, lists: &KeywordLists) -> KeywordAnalysis {
    let text_lower = text.to_lowercase();

    let hits = |phrases: &'static [&'static str]| -> Vec<&'static str> {
        phrases
            .iter()
            .copied()
            .filter(|phrase| text_lower.contains(phrase))
            .collect()
    };

    KeywordAnalysis {
        alarmist_hits: hits(lists.alarmist),
        evidentiary_hits: hits(lists.evidentiary),
    }
}

/// Score text with the built-in phrase lists.
pub fn score_text(text: &str) -> Verdict {
    analyze(text, &KeywordLists::default()).verdict()
}

/// Heuristic backend for the web server.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    lists: KeywordLists,
}

impl KeywordClassifier {
    pub fn new(lists: KeywordLists) -> Self {
        Self { lists }
    }

    pub fn analyze(&self, text: &str) -> KeywordAnalysis {
        analyze(text, &self.lists)
    }
}

#[async_trait]
impl NewsClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<Verdict> {
        Ok(self.analyze(text).verdict())
    }

    fn method(&self) -> Option<&'static str> {
        Some(KEYWORD_METHOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sizes() {
        assert_eq!(ALARMIST_PHRASES.len(), 20);
        assert_eq!(EVIDENTIARY_PHRASES.len(), 12);
    }

    #[test]
    fn test_phrases_are_lowercase() {
        for phrase in ALARMIST_PHRASES.iter().chain(EVIDENTIARY_PHRASES) {
            assert_eq!(*phrase, phrase.to_lowercase(), "{phrase} must be lower-case");
        }
    }

    #[test]
    fn test_repeated_phrase_counts_once() {
        let analysis = analyze("hoax hoax hoax HOAX", &KeywordLists::default());
        assert_eq!(analysis.alarmist_hits, vec!["hoax"]);
        assert_eq!(analysis.fake_score(), 1);
    }

    #[test]
    fn test_case_insensitive() {
        let analysis = analyze("According To the report", &KeywordLists::default());
        assert_eq!(analysis.evidentiary_hits, vec!["according to"]);
    }

    #[test]
    fn test_no_hits_is_neutral_real() {
        let verdict = KeywordAnalysis::default().verdict();
        assert_eq!(verdict.prediction, Prediction::Real);
        assert_eq!(verdict.confidence, 60.0);
    }

    #[test]
    fn test_tie_reads_as_real() {
        let analysis = KeywordAnalysis {
            alarmist_hits: vec!["hoax"],
            evidentiary_hits: vec!["verified"],
        };
        let verdict = analysis.verdict();
        // ratio 0.5 is not a strict majority: 60 + 0.5 * 30 = 75
        assert_eq!(verdict.prediction, Prediction::Real);
        assert!((verdict.confidence - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_lists() {
        const FAKE: &[&str] = &["moon landing"];
        const REAL: &[&str] = &["nasa"];
        let lists = KeywordLists {
            alarmist: FAKE,
            evidentiary: REAL,
        };
        let classifier = KeywordClassifier::new(lists);
        let analysis = classifier.analyze("The moon landing was staged, NASA says");
        assert_eq!(analysis.alarmist_hits, vec!["moon landing"]);
        assert_eq!(analysis.evidentiary_hits, vec!["nasa"]);
        assert_eq!(analysis.verdict().prediction, Prediction::Real);

        // Default phrases play no part once custom lists are supplied
        let analysis = classifier.analyze("SHOCKING moon landing hoax");
        assert_eq!(analysis.alarmist_hits, vec!["moon landing"]);
        assert_eq!(analysis.verdict().prediction, Prediction::Fake);
    }
}
