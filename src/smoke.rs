// Manual smoke test against a running server.
//
// Posts a few canned texts to /check-news and prints what came back. A
// failing case is reported and counted; it never stops the remaining cases.

use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use reqwest::Client;
use serde::Deserialize;

use crate::output::terminal::{colorize_label, display_header};
use crate::output::truncate_chars;

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SmokeCase {
    pub name: &'static str,
    pub text: &'static str,
}

pub const SMOKE_CASES: [SmokeCase; 3] = [
    SmokeCase {
        name: "Fake News Example",
        text: "BREAKING: Shocking secret revealed! They don't want you to know this \
               unbelievable truth about the government conspiracy!",
    },
    SmokeCase {
        name: "Real News Example",
        text: "According to a peer-reviewed study published in Nature, researchers have \
               confirmed that climate change is affecting global weather patterns. The data \
               shows significant temperature increases over the past decade.",
    },
    SmokeCase {
        name: "Neutral Example",
        text: "The weather today is sunny with a temperature of 25 degrees Celsius. Many \
               people are enjoying outdoor activities in the park.",
    },
];

#[derive(Debug, Deserialize)]
struct CheckResponse {
    prediction: String,
    confidence: f64,
    status: String,
    method: Option<String>,
}

/// Tally of smoke-test outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SmokeSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Run every canned case against `base_url` and print the results.
pub async fn run(base_url: &str) -> Result<SmokeSummary> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let endpoint = format!("{}/check-news", base_url.trim_end_matches('/'));

    display_header("FAKE NEWS DETECTION APP - TEST RESULTS");

    let mut summary = SmokeSummary::default();
    for (i, case) in SMOKE_CASES.iter().enumerate() {
        println!("\nTest {}: {}", i + 1, case.name.bold());
        println!("{}", "-".repeat(40).dimmed());
        println!("Input Text: {}", truncate_chars(case.text, 100));

        match check(&client, &endpoint, case.text).await {
            Ok(response) => {
                println!("Prediction: {}", colorize_label(&response.prediction));
                println!("Confidence: {}%", response.confidence);
                println!("Status: {}", response.status);
                if let Some(method) = response.method {
                    println!("Method: {method}");
                }
                summary.succeeded += 1;
            }
            Err(e) => {
                println!("{} {e:#}", "Error:".red());
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

async fn check(client: &Client, endpoint: &str, text: &str) -> Result<CheckResponse> {
    let response = client
        .post(endpoint)
        .json(&serde_json::json!({ "news_text": text }))
        .send()
        .await
        .context("Request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("HTTP {status}\nResponse: {body}");
    }

    response
        .json()
        .await
        .context("Failed to parse /check-news response")
}
