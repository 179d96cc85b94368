/// Errors produced by stylepath while resolving and reading stylesheets.
#[derive(Debug, thiserror::Error)]
pub enum StylepathError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A candidate exists (or may exist) but could not be opened.
    #[error("cannot open {uri}: {source}")]
    Resolve {
        uri: String,
        source: std::io::Error,
    },

    #[error("no stylesheet found for {0}")]
    NotFound(String),
}

impl StylepathError {
    /// Whether a candidate open failure only means "nothing there".
    pub(crate) fn is_missing(err: &std::io::Error) -> bool {
        matches!(
            err.kind(),
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
        )
    }
}
