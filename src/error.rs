/// Crate-level error types for anchorstat diagnostics.
use std::path::PathBuf;

/// All errors in anchorstat carry enough context to produce a useful
/// diagnostic without a debugger. Each variant names the file, identifier,
/// or reason for failure.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The corpus root does not exist or is not a directory.
    #[error("corpus root not found: {}", path.display())]
    CorpusNotFound {
        /// Path that was given as the corpus root.
        path: PathBuf,
    },

    /// The same anchor identifier is declared more than once in the corpus.
    /// Fatal: downstream classification assumes a total, unambiguous
    /// anchor-to-document mapping.
    #[error(
        "duplicate anchor `{id}`: declared in {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateAnchor {
        /// Document that declared the identifier first.
        first: PathBuf,
        /// The identifier declared twice.
        id: String,
        /// Document holding the conflicting declaration.
        second: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
