use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;

use crate::classifier::onnx::DEFAULT_MAX_CHARS;

/// Which classification backend the server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    /// Fixed phrase-list heuristic (default): no model files, no startup cost
    Keywords,
    /// Local ONNX sentiment model, requires `newscheck download-model` first
    Model,
}

impl FromStr for ClassifierBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keywords" | "keyword" | "heuristic" => Ok(Self::Keywords),
            "model" | "onnx" => Ok(Self::Model),
            other => anyhow::bail!("Unknown backend '{other}'. Expected 'keywords' or 'model'."),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend chosen on the command line; wins over NEWSCHECK_BACKEND
    pub backend_flag: Option<ClassifierBackend>,
    /// Raw NEWSCHECK_BACKEND, parsed only when a command needs a backend
    backend_env: Option<String>,
    /// Directory containing the ONNX model files
    pub model_dir: PathBuf,
    pub bind: String,
    pub port: u16,
    /// Worker threads in the server runtime
    pub threads: usize,
    /// Character budget applied to text before model inference
    pub max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_flag: None,
            backend_env: None,
            model_dir: crate::classifier::download::default_model_dir(),
            bind: "127.0.0.1".to_string(),
            port: 5000,
            threads: 4,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// A malformed value is an error rather than a silent default.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let model_dir = env::var("NEWSCHECK_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_dir);

        let config = Self {
            backend_flag: None,
            backend_env: env::var("NEWSCHECK_BACKEND").ok(),
            model_dir,
            bind: env::var("NEWSCHECK_BIND").unwrap_or(defaults.bind),
            port: parse_var("NEWSCHECK_PORT", defaults.port)?,
            threads: parse_var("NEWSCHECK_THREADS", defaults.threads)?,
            max_chars: parse_var("NEWSCHECK_MAX_CHARS", defaults.max_chars)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// The backend to run: the command-line flag, else NEWSCHECK_BACKEND,
    /// else keywords.
    pub fn backend(&self) -> Result<ClassifierBackend> {
        if let Some(backend) = self.backend_flag {
            return Ok(backend);
        }
        match &self.backend_env {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid NEWSCHECK_BACKEND={raw:?}: {e}")),
            None => Ok(ClassifierBackend::Keywords),
        }
    }

    /// Check value ranges that the type system can't express.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            anyhow::bail!("NEWSCHECK_THREADS must be at least 1");
        }
        if self.max_chars == 0 {
            anyhow::bail!("NEWSCHECK_MAX_CHARS must be at least 1");
        }
        Ok(())
    }

    /// Validate that the chosen backend has what it needs.
    /// For the model: files must exist (or user should run download-model).
    pub fn require_classifier(&self) -> Result<()> {
        match self.backend()? {
            ClassifierBackend::Keywords => Ok(()),
            ClassifierBackend::Model => {
                if !crate::classifier::download::model_files_present(&self.model_dir) {
                    anyhow::bail!(
                        "ONNX model files not found in {}\n\
                         Run `newscheck download-model` to download them.\n\
                         Or set NEWSCHECK_BACKEND=keywords to use the keyword heuristic instead.",
                        self.model_dir.display()
                    );
                }
                Ok(())
            }
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {name}={raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("keywords".parse::<ClassifierBackend>().unwrap(), ClassifierBackend::Keywords);
        assert_eq!("MODEL".parse::<ClassifierBackend>().unwrap(), ClassifierBackend::Model);
        assert_eq!(" onnx ".parse::<ClassifierBackend>().unwrap(), ClassifierBackend::Model);
        assert!("bert".parse::<ClassifierBackend>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend().unwrap(), ClassifierBackend::Keywords);
        assert_eq!(config.port, 5000);
        assert_eq!(config.threads, 4);
        assert_eq!(config.max_chars, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = Config {
            threads: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_keywords_backend_needs_nothing() {
        let config = Config {
            model_dir: PathBuf::from("/nonexistent/newscheck"),
            ..Config::default()
        };
        assert!(config.require_classifier().is_ok());
    }

    #[test]
    fn test_model_backend_requires_files() {
        let config = Config {
            backend_flag: Some(ClassifierBackend::Model),
            model_dir: PathBuf::from("/nonexistent/newscheck"),
            ..Config::default()
        };
        let err = config.require_classifier().unwrap_err();
        assert!(err.to_string().contains("download-model"));
    }

    #[test]
    fn test_backend_from_env_value() {
        let config = Config {
            backend_env: Some("model".to_string()),
            ..Config::default()
        };
        assert_eq!(config.backend().unwrap(), ClassifierBackend::Model);
    }

    #[test]
    fn test_flag_wins_over_bad_env_backend() {
        let config = Config {
            backend_flag: Some(ClassifierBackend::Keywords),
            backend_env: Some("bert".to_string()),
            ..Config::default()
        };
        assert_eq!(config.backend().unwrap(), ClassifierBackend::Keywords);
        assert!(config.require_classifier().is_ok());
    }

    #[test]
    fn test_bad_env_backend_fails_only_when_used() {
        let config = Config {
            backend_env: Some("bert".to_string()),
            ..Config::default()
        };
        // Commands that never pick a backend are unaffected
        assert!(config.validate().is_ok());

        let err = config.backend().unwrap_err();
        assert!(err.to_string().contains("NEWSCHECK_BACKEND"));
        assert!(config.require_classifier().is_err());
    }
}
