use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::index::ParagraphIndex;
use crate::prefs::Preferences;
use crate::project::ProjectState;
use crate::segmenter::normalization;
use crate::source::{InMemorySource, TextSource};

/// One narration recording session: a paragraph index plus the cursor,
/// take naming, and save/resume bookkeeping around it.
///
/// Navigation never skips: `next` at the discovery frontier extends the
/// index by exactly one paragraph, and an exhausted document leaves the
/// position where it was.
#[derive(Debug)]
pub struct NarrationSession<S> {
    index: ParagraphIndex<S>,
    current: usize,
    source_path: PathBuf,
    audio_extension: String,
    simplify: bool,
}

impl NarrationSession<InMemorySource> {
    /// Start a fresh session over a text file.
    ///
    /// Discovers paragraph 0 eagerly, so a document without a single
    /// complete sentence fails here with `EndOfDocument`.
    pub async fn open(path: impl AsRef<Path>, prefs: &Preferences) -> Result<Self> {
        let path = path.as_ref();
        let source = InMemorySource::open(path).await?;
        let session = Self::with_source(source, path, prefs)?;
        info!("Opened new session over {}", path.display());
        Ok(session)
    }

    /// Resume a previously saved session from its project file.
    ///
    /// The project's source document is re-opened (`SourceUnavailable` when
    /// it moved or is unreadable) and the index is restored from the
    /// persisted offsets, so scanning continues where the saved session
    /// stopped instead of restarting from offset zero.
    pub async fn resume(project_path: impl AsRef<Path>, prefs: &Preferences) -> Result<Self> {
        let project_path = project_path.as_ref();
        let state = ProjectState::load(project_path).await?;

        let source = InMemorySource::open(&state.source_path).await?;
        let index = ParagraphIndex::restore(
            source,
            &state.offsets,
            prefs.sentence_limit,
            Some(state.total_count),
        )?;

        let mut session = Self {
            index,
            current: state.current_index,
            source_path: state.source_path,
            audio_extension: state.audio_extension,
            simplify: prefs.simplify,
        };

        // The persisted position must be reachable; this also rehydrates
        // the text cache for the paragraph about to be displayed.
        session.index.paragraph(session.current)?;
        info!(
            "Resumed session from {}: paragraph {} of {}",
            project_path.display(),
            session.current + 1,
            session.index.total_paragraph_count()
        );
        Ok(session)
    }
}

impl<S: TextSource> NarrationSession<S> {
    /// Build a session over an already-opened source.
    pub fn with_source(source: S, source_path: impl Into<PathBuf>, prefs: &Preferences) -> Result<Self> {
        let mut index = ParagraphIndex::new(source, prefs.sentence_limit);
        index.paragraph(0)?;

        Ok(Self {
            index,
            current: 0,
            source_path: source_path.into(),
            audio_extension: prefs.audio_extension.clone(),
            simplify: prefs.simplify,
        })
    }

    /// Zero-based position of the paragraph being narrated.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Text of the current paragraph, simplified when configured.
    pub fn current_paragraph(&mut self) -> Result<String> {
        let text = self.index.paragraph(self.current)?;
        Ok(self.present(text))
    }

    /// Advance one paragraph, extending discovery when at the frontier.
    ///
    /// `EndOfDocument` leaves the position unchanged; callers typically
    /// disable their "next" affordance on it.
    pub fn next(&mut self) -> Result<String> {
        let text = self.index.paragraph(self.current + 1)?;
        self.current += 1;
        debug!("Moved to paragraph {}", self.current);
        Ok(self.present(text))
    }

    /// Step back one paragraph, flooring at the first.
    pub fn back(&mut self) -> Result<String> {
        if self.current > 0 {
            self.current -= 1;
            debug!("Moved back to paragraph {}", self.current);
        }
        self.current_paragraph()
    }

    /// Jump to a specific paragraph, discovering any intermediates.
    pub fn go_to(&mut self, number: usize) -> Result<String> {
        let text = self.index.paragraph(number)?;
        self.current = number;
        Ok(self.present(text))
    }

    pub fn total_paragraph_count(&mut self) -> usize {
        self.index.total_paragraph_count()
    }

    /// Display label, 1-based: `Paragraph 3 of 12`.
    pub fn paragraph_label(&mut self) -> String {
        format!(
            "Paragraph {} of {}",
            self.current + 1,
            self.index.total_paragraph_count()
        )
    }

    /// Audio take file name paired with the current paragraph.
    pub fn take_file_name(&self) -> String {
        format!("part{}.{}", self.current, self.audio_extension)
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn audio_extension(&self) -> &str {
        &self.audio_extension
    }

    /// True when discoveries since the last save would be lost on exit.
    pub fn is_dirty(&self) -> bool {
        self.index.is_changed()
    }

    /// Snapshot the session to a project file and clear the dirty flag.
    pub async fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let state = ProjectState::snapshot(
            &mut self.index,
            self.current,
            &self.source_path,
            &self.audio_extension,
        );

        state.save(path).await.map_err(|e| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.index.mark_saved();
        Ok(())
    }

    pub fn index(&self) -> &ParagraphIndex<S> {
        &self.index
    }

    fn present(&self, text: String) -> String {
        if self.simplify {
            normalization::simplify(&text)
        } else {
            text
        }
    }
}
