use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use crate::error::StylepathError;
use crate::model::{ParentContext, ResolvedSource};

use super::{shared, Resolver};

/// Serves stylesheets bundled into the program, keyed by URI.
///
/// Fills the role a classpath or resource-bundle lookup plays in other
/// toolchains: themes shipped with a library can be imported without
/// touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResolver {
    search_paths: Vec<String>,
    entries: HashMap<String, Arc<[u8]>>,
}

impl EmbeddedResolver {
    pub fn new<I, S>(search_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
            entries: HashMap::new(),
        }
    }

    pub fn with_entry(mut self, uri: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(uri, contents);
        self
    }

    pub fn insert(&mut self, uri: impl Into<String>, contents: impl Into<Vec<u8>>) {
        let key = shared::collapse_dots(&uri.into());
        self.entries.insert(key, Arc::from(contents.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Resolver for EmbeddedResolver {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn build_candidates(&self, parent: &ParentContext, identifier: &str) -> Vec<String> {
        shared::candidates_with_roots(parent, identifier, &self.search_paths)
    }

    fn resolve(&self, identifier: &str) -> Result<Option<ResolvedSource>, StylepathError> {
        let uri = shared::normalize_identifier(identifier);
        Ok(self
            .entries
            .get(&uri)
            .map(|bytes| ResolvedSource::new(uri.clone(), Cursor::new(Arc::clone(bytes)))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_import;

    #[test]
    fn resolve_finds_entry_by_normalized_uri() {
        let resolver = EmbeddedResolver::default().with_entry("/themes/base.scss", "a{}");
        let source = resolver.resolve("/themes/base").unwrap().unwrap();
        assert_eq!(source.uri(), "/themes/base.scss");
        assert_eq!(source.read_text().unwrap(), "a{}");
    }

    #[test]
    fn insert_collapses_dot_segments() {
        let resolver = EmbeddedResolver::default().with_entry("/themes/x/../base.scss", "");
        assert_eq!(resolver.len(), 1);
        assert!(resolver.resolve("/themes/base").unwrap().is_some());
    }

    #[test]
    fn resolve_missing_entry_is_none() {
        let resolver = EmbeddedResolver::default();
        assert!(resolver.is_empty());
        assert!(resolver.resolve("/themes/base").unwrap().is_none());
    }

    #[test]
    fn second_root_hit_after_miss() {
        let resolver = EmbeddedResolver::new(["/first/", "/second/"])
            .with_entry("/second/mixins.scss", "@mixin m {}");
        let parent = ParentContext::new("/proj/a.scss");

        let source = resolve_import(&resolver, &parent, "mixins").unwrap().unwrap();
        assert_eq!(source.uri(), "/second/mixins.scss");
    }

    #[test]
    fn each_resolution_gets_its_own_stream() {
        let resolver = EmbeddedResolver::default().with_entry("/a.scss", "body{}");
        let first = resolver.resolve("/a").unwrap().unwrap();
        let second = resolver.resolve("/a").unwrap().unwrap();
        assert_eq!(first.read_text().unwrap(), "body{}");
        assert_eq!(second.read_text().unwrap(), "body{}");
    }
}
