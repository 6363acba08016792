use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::segmenter::DEFAULT_SENTENCE_LIMIT;

/// Recording and segmentation preferences.
///
/// The recording fields describe how takes should be encoded; `None` (or 0)
/// means the device default. This crate only carries them between sessions —
/// the recording backend that consumes them lives outside.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    /// File extension for take files (`part<N>.<ext>`).
    pub audio_extension: String,
    /// Audio codec name, device default when absent.
    pub codec: Option<String>,
    /// Container format name, device default when absent.
    pub container: Option<String>,
    /// Sample rate in Hz, device default when 0.
    pub sample_rate: u32,
    /// Channel count, device default when 0.
    pub channel_count: u16,
    /// Sentences grouped into one paragraph.
    pub sentence_limit: usize,
    /// Collapse interior whitespace in displayed paragraphs.
    pub simplify: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            audio_extension: "wav".to_string(),
            codec: None,
            container: None,
            sample_rate: 0,
            channel_count: 0,
            sentence_limit: DEFAULT_SENTENCE_LIMIT,
            simplify: false,
        }
    }
}

/// Preferences file location inside a settings directory.
pub fn prefs_path(dir: &Path) -> PathBuf {
    dir.join(".prompter_prefs.json")
}

impl Preferences {
    /// Load preferences, falling back to defaults when the file is missing
    /// or unparseable. A corrupt file is logged, never fatal.
    pub async fn load(dir: &Path) -> Self {
        let path = prefs_path(dir);

        match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring corrupt preferences at {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => {
                debug!("No preferences at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Persist preferences as pretty JSON, creating the directory if needed.
    pub async fn save(&self, dir: &Path) -> io::Result<()> {
        let path = prefs_path(dir);
        let content = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::create_dir_all(dir).await?;
        fs::write(&path, content).await?;
        debug!("Saved preferences to {}", path.display());
        Ok(())
    }
}
