use std::path::PathBuf;

/// Contract violations reported by [`crate::parse_entry`].
///
/// Missing categories, tables or meanings are not errors; they surface as
/// absent fields on the returned entry.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("article fragment is empty")]
    EmptyFragment,
    #[error("article fragment contains no markup elements")]
    NotMarkup,
    #[error("no headword could be reconstructed from the article")]
    MissingHeadword,
}

/// Failures while loading a part-of-speech schema file.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid abbreviation pattern {0:?}: {1}")]
    Pattern(String, regex::Error),
    #[error("unknown part-of-speech code {0:?}")]
    UnknownCode(String),
    #[error("part-of-speech schema already initialized")]
    AlreadyInitialized,
}
