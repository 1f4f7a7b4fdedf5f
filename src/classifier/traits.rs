// News classifier trait and the verdict types every backend produces.

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Serialize, Serializer};

/// Binary label surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Fake,
    Real,
}

impl Prediction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prediction::Fake => "Fake News",
            Prediction::Real => "Real News",
        }
    }

    /// Display color used by the web form.
    pub fn color(&self) -> &'static str {
        match self {
            Prediction::Fake => "red",
            Prediction::Real => "green",
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The outcome of classifying one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub prediction: Prediction,
    /// Percentage in (0, 100]. Not a calibrated probability.
    pub confidence: f64,
}

/// Trait for classifying news text. Async because the model backend
/// offloads inference to a blocking thread.
#[async_trait]
pub trait NewsClassifier: Send + Sync {
    /// Classify already-validated text.
    async fn classify(&self, text: &str) -> Result<Verdict>;

    /// Human-readable method name included in API responses, if any.
    fn method(&self) -> Option<&'static str> {
        None
    }
}

/// Round to two decimal places, the precision the API reports.
///
/// Exact halves go to the even neighbour (80.625 -> 80.62).
pub fn round_confidence(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
