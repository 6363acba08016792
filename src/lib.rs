pub mod error;
pub mod index;
pub mod prefs;
pub mod project;
pub mod segmenter;
pub mod session;
pub mod source;

// Re-export main types for convenient access
pub use error::{Error, Result};
pub use index::{ParagraphEntry, ParagraphIndex};
pub use prefs::Preferences;
pub use project::ProjectState;
pub use segmenter::DEFAULT_SENTENCE_LIMIT;
pub use session::NarrationSession;
pub use source::{InMemorySource, MappedSource, TextSource};
