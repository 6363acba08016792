use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::index::ParagraphIndex;
use crate::source::TextSource;

/// File extension for persisted narration projects.
pub const PROJECT_EXTENSION: &str = "ndp";

/// Snapshot of a narration session: the index's discovered offsets plus the
/// bookkeeping needed to resume.
///
/// Persisted as five newline-separated UTF-8 lines:
///
/// ```text
/// <totalParagraphCount>
/// <offset0>,<offset1>,...,<offsetN>,
/// <currentParagraphIndex>
/// <sourceDocumentPath>
/// <audioFileExtension>
/// ```
///
/// The offsets line carries a trailing comma and is empty for a project
/// saved before any paragraph was discovered. Cached paragraph text is
/// never persisted; a restored index recomputes text from offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectState {
    pub total_count: usize,
    pub offsets: Vec<usize>,
    pub current_index: usize,
    pub source_path: PathBuf,
    pub audio_extension: String,
}

impl ProjectState {
    /// Capture the persistable parts of an index plus session cursor.
    ///
    /// Forces the memoized total so a saved project always knows its
    /// paragraph count.
    pub fn snapshot<S: TextSource>(
        index: &mut ParagraphIndex<S>,
        current_index: usize,
        source_path: impl Into<PathBuf>,
        audio_extension: impl Into<String>,
    ) -> Self {
        Self {
            total_count: index.total_paragraph_count(),
            offsets: index.start_offsets().collect(),
            current_index,
            source_path: source_path.into(),
            audio_extension: audio_extension.into(),
        }
    }

    /// Render the five-line project format.
    pub fn render(&self) -> String {
        let offsets: String = self
            .offsets
            .iter()
            .map(|offset| format!("{offset},"))
            .collect();

        format!(
            "{}\n{}\n{}\n{}\n{}\n",
            self.total_count,
            offsets,
            self.current_index,
            self.source_path.display(),
            self.audio_extension
        )
    }

    /// Parse the five-line project format.
    ///
    /// Tolerates the trailing comma on the offsets line (and an entirely
    /// empty line for zero entries). A missing line or an unparseable
    /// number is `MalformedState`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let mut next_line = |what: &str| {
            lines
                .next()
                .ok_or_else(|| Error::malformed(format!("missing {what} line")))
        };

        let total_count = parse_number(next_line("total paragraph count")?, "total count")?;

        let offsets = next_line("paragraph offsets")?
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(|token| parse_number(token, "paragraph offset"))
            .collect::<Result<Vec<usize>>>()?;

        let current_index = parse_number(next_line("current paragraph")?, "current paragraph")?;
        let source_path = PathBuf::from(next_line("source path")?);
        let audio_extension = next_line("audio extension")?.to_string();

        Ok(Self {
            total_count,
            offsets,
            current_index,
            source_path,
            audio_extension,
        })
    }

    /// Write the project file, creating parent directories as needed.
    pub async fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(path, self.render()).await?;
        info!(
            "Saved project to {}: {} known paragraphs, current {}",
            path.display(),
            self.offsets.len(),
            self.current_index
        );
        Ok(())
    }

    /// Read and parse a project file.
    ///
    /// An unreadable file is `SourceUnavailable`; unparseable content is
    /// `MalformedState`. Callers typically offer a fresh scan on either.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading project from {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::SourceUnavailable {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::parse(&content)
    }
}

fn parse_number(token: &str, what: &str) -> Result<usize> {
    token
        .trim()
        .parse()
        .map_err(|_| Error::malformed(format!("bad {what}: {token:?}")))
}
