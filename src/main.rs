use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use newscheck::classifier::keywords::KeywordClassifier;
use newscheck::classifier::onnx::OnnxSentimentClassifier;
use newscheck::classifier::traits::NewsClassifier;
use newscheck::config::{ClassifierBackend, Config};
use newscheck::output::terminal;
use newscheck::web::handlers::check::validate_news_text;

/// newscheck: label a block of news text as fake or real.
///
/// Serves a small web form backed by either a keyword heuristic or a
/// pretrained sentiment model.
#[derive(Parser)]
#[command(name = "newscheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Classification backend: keywords or model
        #[arg(long)]
        backend: Option<ClassifierBackend>,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (default: 5000)
        #[arg(long)]
        port: Option<u16>,

        /// Worker threads serving requests (default: 4)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Download the ONNX sentiment model (~67 MB)
    DownloadModel {
        /// Destination directory (default: platform data dir)
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },

    /// Classify text locally without starting the server
    Check {
        /// The news text to classify
        text: String,

        /// Classification backend: keywords or model
        #[arg(long)]
        backend: Option<ClassifierBackend>,
    },

    /// Post canned examples to a running server and print the results
    Smoke {
        /// Base URL of the server
        #[arg(long, default_value = newscheck::smoke::DEFAULT_URL)]
        url: String,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("newscheck=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    apply_overrides(&mut config, &cli.command);
    config.validate()?;

    // Fixed-size worker pool; no request state is shared across workers.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.threads)
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run(cli.command, config))
}

/// Command-line flags win over environment variables.
fn apply_overrides(config: &mut Config, command: &Commands) {
    match command {
        Commands::Serve {
            backend,
            bind,
            port,
            threads,
        } => {
            if let Some(backend) = backend {
                config.backend_flag = Some(*backend);
            }
            if let Some(bind) = bind {
                config.bind = bind.clone();
            }
            if let Some(port) = port {
                config.port = *port;
            }
            if let Some(threads) = threads {
                config.threads = *threads;
            }
        }
        Commands::DownloadModel { model_dir } => {
            if let Some(dir) = model_dir {
                config.model_dir = dir.clone();
            }
        }
        Commands::Check { backend, .. } => {
            if let Some(backend) = backend {
                config.backend_flag = Some(*backend);
            }
        }
        Commands::Smoke { .. } => {}
    }
}

async fn run(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Serve { .. } => {
            config.require_classifier()?;
            let classifier = create_classifier(&config)?;
            info!(
                backend = ?config.backend()?,
                threads = config.threads,
                "Starting newscheck server"
            );
            newscheck::web::run_server(classifier, &config.bind, config.port).await?;
        }

        Commands::DownloadModel { .. } => {
            let model_dir = &config.model_dir;

            println!("Downloading ONNX sentiment model...");
            println!("  Destination: {}", model_dir.display());

            newscheck::classifier::download::download_model(model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `newscheck serve --backend model`.");
        }

        Commands::Check { text, .. } => {
            let text = validate_news_text(&text).map_err(|e| anyhow::anyhow!(e.message()))?;

            match config.backend()? {
                ClassifierBackend::Keywords => {
                    let classifier = KeywordClassifier::default();
                    let analysis = classifier.analyze(text);
                    terminal::display_verdict(&analysis.verdict(), classifier.method());
                    terminal::display_keyword_hits(&analysis);
                }
                ClassifierBackend::Model => {
                    config.require_classifier()?;
                    let classifier = create_classifier(&config)?;
                    let verdict = classifier.classify(text).await?;
                    terminal::display_verdict(&verdict, classifier.method());
                }
            }
        }

        Commands::Smoke { url } => {
            let summary = newscheck::smoke::run(&url).await?;
            println!(
                "\n{} succeeded, {} failed",
                summary.succeeded.to_string().green(),
                summary.failed.to_string().red()
            );
            if summary.failed > 0 {
                anyhow::bail!("{} smoke test case(s) failed", summary.failed);
            }
        }
    }

    Ok(())
}

/// Build the configured backend once; the server shares it read-only.
fn create_classifier(config: &Config) -> Result<Arc<dyn NewsClassifier>> {
    match config.backend()? {
        ClassifierBackend::Keywords => {
            info!("Using keyword heuristic classifier");
            Ok(Arc::new(KeywordClassifier::default()))
        }
        ClassifierBackend::Model => {
            info!("Loading ONNX sentiment model from {}", config.model_dir.display());
            let classifier = OnnxSentimentClassifier::load(&config.model_dir, config.max_chars)?;
            info!("Model loaded");
            Ok(Arc::new(classifier))
        }
    }
}
