use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::matching::skill_match::{KEYWORD_BACKEND, LLM_BACKEND};

/// Default upload limit, 5 MiB.
pub const DEFAULT_MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Which `ResumeAnalyzer` implementation serves resume analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzerBackend {
    #[default]
    Keyword,
    Llm,
}

impl FromStr for AnalyzerBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            KEYWORD_BACKEND => Ok(AnalyzerBackend::Keyword),
            LLM_BACKEND => Ok(AnalyzerBackend::Llm),
            other => Err(anyhow!(
                "unknown analyzer backend '{other}' (expected '{KEYWORD_BACKEND}' or '{LLM_BACKEND}')"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub resume_analyzer: AnalyzerBackend,
    /// JSON file replacing the built-in skill catalog and role map.
    pub skill_catalog_path: Option<PathBuf>,
    pub max_resume_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            resume_analyzer: optional_env("RESUME_ANALYZER")
                .map(|v| v.parse::<AnalyzerBackend>())
                .transpose()
                .context("RESUME_ANALYZER is invalid")?
                .unwrap_or_default(),
            skill_catalog_path: optional_env("SKILL_CATALOG_PATH").map(PathBuf::from),
            max_resume_bytes: parse_max_resume_bytes(optional_env("MAX_RESUME_BYTES").as_deref())?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_max_resume_bytes(raw: Option<&str>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_RESUME_BYTES);
    };
    let bytes = raw
        .trim()
        .parse::<usize>()
        .context("MAX_RESUME_BYTES must be a positive integer")?;
    if bytes == 0 {
        return Err(anyhow!("MAX_RESUME_BYTES must be greater than zero"));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_backend_parsing() {
        assert_eq!("keyword".parse::<AnalyzerBackend>().unwrap(), AnalyzerBackend::Keyword);
        assert_eq!(" LLM ".parse::<AnalyzerBackend>().unwrap(), AnalyzerBackend::Llm);
        assert!("openai".parse::<AnalyzerBackend>().is_err());
        assert_eq!(AnalyzerBackend::default(), AnalyzerBackend::Keyword);
    }

    #[test]
    fn test_max_resume_bytes() {
        assert_eq!(parse_max_resume_bytes(None).unwrap(), 5_242_880);
        assert_eq!(parse_max_resume_bytes(Some("1024")).unwrap(), 1024);
        assert!(parse_max_resume_bytes(Some("0")).is_err());
        assert!(parse_max_resume_bytes(Some("lots")).is_err());
    }
}
