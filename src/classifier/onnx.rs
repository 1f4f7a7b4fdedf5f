// Local ONNX sentiment classifier repurposed as a fake/real signal.
//
// Model: distilbert-base-uncased-finetuned-sst-2-english (ONNX export,
// quantized). Output: two logits, NEGATIVE then POSITIVE. POSITIVE is
// surfaced as "Real News", NEGATIVE as "Fake News", and the softmax
// probability of the winning label becomes the confidence.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::download::{MODEL_FILE, TOKENIZER_FILE};
use super::traits::{round_confidence, NewsClassifier, Prediction, Verdict};

/// Labels output by the SST-2 head, in the order the model returns them.
const LABEL_ORDER: [SentimentLabel; 2] = [SentimentLabel::Negative, SentimentLabel::Positive];

/// DistilBERT's position embedding limit.
const MAX_TOKENS: usize = 512;

/// Default character budget applied before tokenization.
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Raw sentiment label as reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Negative,
    Positive,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Positive => "POSITIVE",
        }
    }

    /// Remap table: POSITIVE reads as real, anything else as fake.
    pub fn to_prediction(self) -> Prediction {
        match self {
            SentimentLabel::Positive => Prediction::Real,
            SentimentLabel::Negative => Prediction::Fake,
        }
    }
}

/// Model-backed classifier. Loaded once at startup and shared by all requests.
pub struct OnnxSentimentClassifier {
    // ort::Session::run takes &mut self; spawn_blocking needs 'static.
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    max_chars: usize,
}

impl OnnxSentimentClassifier {
    /// Load the ONNX model and tokenizer from the given directory.
    ///
    /// Expects `model_quantized.onnx` and `tokenizer.json` to exist in `model_dir`.
    pub fn load(model_dir: &Path, max_chars: usize) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!(
                "Model file not found: {}\nRun `newscheck download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Tokenizer file not found: {}\nRun `newscheck download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure tokenizer truncation: {}", e))?;
        tokenizer.with_padding(None);

        debug!("Loaded ONNX sentiment model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            max_chars,
        })
    }
}

#[async_trait]
impl NewsClassifier for OnnxSentimentClassifier {
    /// Tokenize, run one forward pass, softmax the logits and remap the label.
    ///
    /// The CPU-bound work runs on spawn_blocking so the async workers stay
    /// free to accept other requests.
    async fn classify(&self, text: &str) -> Result<Verdict> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let text = truncate_to_budget(text, self.max_chars).to_string();

        tokio::task::spawn_blocking(move || {
            let encoding = tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();

            let shape = [1_i64, input_ids.len() as i64];

            let input_ids_tensor = Tensor::from_array((shape, input_ids))
                .context("Failed to create input_ids tensor")?;
            let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
                .context("Failed to create attention_mask tensor")?;

            let logits = {
                let mut session = session
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

                let outputs = session
                    .run(ort::inputs! {
                        "input_ids" => input_ids_tensor,
                        "attention_mask" => attention_mask_tensor
                    })
                    .context("ONNX inference failed")?;

                // Output shape: [1, 2], raw logits
                let (_out_shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("Failed to extract output tensor")?;

                data.to_vec()
            };

            if logits.len() != LABEL_ORDER.len() {
                anyhow::bail!(
                    "Unexpected model output: expected {} logits, got {}",
                    LABEL_ORDER.len(),
                    logits.len()
                );
            }

            let (label, score) = top_label(&logits);
            let verdict = Verdict {
                prediction: label.to_prediction(),
                confidence: round_confidence(score * 100.0),
            };

            debug!(
                label = label.as_str(),
                score,
                text_preview = %crate::output::truncate_chars(&text, 50),
                "ONNX classified text"
            );

            Ok(verdict)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Keep at most `max_chars` characters, respecting UTF-8 boundaries.
pub fn truncate_to_budget(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Numerically stable softmax.
fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps: Vec<f64> = logits.iter().map(|&l| (l as f64 - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Pick the most probable label and its probability.
fn top_label(logits: &[f32]) -> (SentimentLabel, f64) {
    let probs = softmax(logits);
    LABEL_ORDER
        .iter()
        .copied()
        .zip(probs)
        .fold((SentimentLabel::Positive, f64::NEG_INFINITY), |best, cur| {
            if cur.1 > best.1 {
                cur
            } else {
                best
            }
        })
}
