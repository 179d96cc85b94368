use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::error::StylepathError;

/// The stylesheet performing an import.
///
/// Only its location matters for resolution: the directory part of the URI
/// is the base for parent-relative candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentContext {
    uri: Option<String>,
}

impl ParentContext {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
        }
    }

    /// A source with no known location (stdin, generated text).
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(crate::util::path_to_uri(path))
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Directory part of the URI including the trailing `/`, or `""`.
    pub fn base_dir(&self) -> &str {
        match self.uri.as_deref() {
            Some(uri) => uri.rfind('/').map_or("", |pos| &uri[..=pos]),
            None => "",
        }
    }
}

/// An opened stylesheet: the readable stream plus the URI it came from.
///
/// The stream is released when this value is dropped.
pub struct ResolvedSource {
    uri: String,
    stream: Box<dyn Read>,
}

impl ResolvedSource {
    pub fn new(uri: impl Into<String>, stream: impl Read + 'static) -> Self {
        Self {
            uri: uri.into(),
            stream: Box::new(stream),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Drain the stream as text, replacing invalid UTF-8.
    pub fn read_text(mut self) -> Result<String, StylepathError> {
        let mut buf = Vec::new();
        self.stream
            .read_to_end(&mut buf)
            .map_err(|e| StylepathError::Io {
                path: self.uri.clone(),
                source: e,
            })?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Read for ResolvedSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.stream.read(buf)
    }
}

impl fmt::Debug for ResolvedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSource")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

/// How an `@import` target is treated by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Resolved and inlined.
    Stylesheet,
    /// Emitted as a CSS `@import` and never resolved.
    PlainCss,
}

/// One target of an `@import` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    pub target: String,
    pub line: usize,
    pub kind: ImportKind,
}
