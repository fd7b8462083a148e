use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
const SESSIONS_LOG_FILE: &str = "sessions.jsonl";
const LOG_DIR: &str = "json-logs";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the dashboard server binds to.
    pub bind_addr: String,
    /// Ordered candidate paths for the sessions log; first existing wins.
    pub sessions_log_candidates: Vec<PathBuf>,
    /// Where the generator writes its records.
    pub generator_output: PathBuf,
}

impl Settings {
    /// Reads configuration from the environment, loading `.env` from the
    /// working directory first. `LOCKEDIN_SESSIONS_LOG` replaces both the
    /// candidate list and the generator target with one explicit path.
    pub fn new() -> Result<Self> {
        let root = env::current_dir()?;
        dotenvy::from_path(root.join(".env")).ok();

        let bind_addr =
            env::var("LOCKEDIN_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let (sessions_log_candidates, generator_output) = match env::var("LOCKEDIN_SESSIONS_LOG") {
            Ok(path) if !path.trim().is_empty() => {
                let explicit = PathBuf::from(path);
                log::info!("Sessions log pinned to {}", explicit.display());
                (vec![explicit.clone()], explicit)
            }
            _ => (
                log_candidates(&root),
                root.join(LOG_DIR).join(SESSIONS_LOG_FILE),
            ),
        };

        Ok(Self {
            bind_addr,
            sessions_log_candidates,
            generator_output,
        })
    }
}

/// Default lookup order anchored at the working directory: the parent's
/// json-logs directory first, then the local one the generator writes to.
pub fn log_candidates(root: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(parent) = root.parent() {
        candidates.push(parent.join(LOG_DIR).join(SESSIONS_LOG_FILE));
    }
    candidates.push(root.join(LOG_DIR).join(SESSIONS_LOG_FILE));
    candidates
}
