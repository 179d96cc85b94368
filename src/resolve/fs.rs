use std::fs::File;
use std::io::{self, BufReader};

use crate::error::StylepathError;
use crate::model::{ParentContext, ResolvedSource};

use super::{shared, Resolver};

/// Looks up stylesheets on the local filesystem.
///
/// Candidates are the parent's directory followed by the configured search
/// roots, much like a compiler include path.
#[derive(Debug, Clone, Default)]
pub struct FilesystemResolver {
    search_paths: Vec<String>,
}

impl FilesystemResolver {
    pub fn new<I, S>(search_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Resolver for FilesystemResolver {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn build_candidates(&self, parent: &ParentContext, identifier: &str) -> Vec<String> {
        shared::candidates_with_roots(parent, identifier, &self.search_paths)
    }

    fn resolve(&self, identifier: &str) -> Result<Option<ResolvedSource>, StylepathError> {
        let uri = shared::normalize_identifier(identifier);
        match open_file(&uri) {
            Ok(Some(file)) => Ok(Some(ResolvedSource::new(uri, BufReader::new(file)))),
            Ok(None) => Ok(None),
            Err(source) => Err(StylepathError::Resolve { uri, source }),
        }
    }
}

/// Open a regular file; missing paths and directories are `Ok(None)`.
fn open_file(path: &str) -> io::Result<Option<File>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if StylepathError::is_missing(&e) => return Ok(None),
        Err(e) => return Err(e),
    };
    // Directories open successfully on unix.
    if file.metadata()?.is_dir() {
        return Ok(None);
    }
    Ok(Some(file))
}
