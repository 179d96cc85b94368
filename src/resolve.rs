//! Import resolution.
//!
//! A [`Resolver`] is one lookup strategy: it turns an identifier into an
//! ordered list of candidates and knows how to open a single candidate.
//! [`resolve_import`] runs the candidate loop for one strategy and
//! [`ResolverChain`] tries several strategies in turn.

mod embedded;
mod fs;
mod shared;

use log::debug;

use crate::error::StylepathError;
use crate::model::{ParentContext, ResolvedSource};

pub use embedded::EmbeddedResolver;
pub use fs::FilesystemResolver;
pub use shared::{normalize_identifier, CSS_EXTENSION, DEFAULT_EXTENSION};
pub(crate) use shared::collapse_dots;

/// A pluggable strategy mapping an identifier to an open stylesheet.
pub trait Resolver {
    /// Short label used in diagnostics.
    fn name(&self) -> &'static str;

    /// Ordered candidates to try, without the default extension.
    ///
    /// Pure string construction; never touches the backing store.
    fn build_candidates(&self, parent: &ParentContext, identifier: &str) -> Vec<String>;

    /// Normalize one candidate and try to open it.
    ///
    /// `Ok(None)` means "not here, try the next candidate".
    fn resolve(&self, identifier: &str) -> Result<Option<ResolvedSource>, StylepathError>;
}

/// Try every candidate of `resolver` in order and return the first hit.
///
/// The first non-missing I/O failure aborts the loop.
pub fn resolve_import<R: Resolver + ?Sized>(
    resolver: &R,
    parent: &ParentContext,
    identifier: &str,
) -> Result<Option<ResolvedSource>, StylepathError> {
    for candidate in resolver.build_candidates(parent, identifier) {
        debug!(
            "{}: probing {}",
            resolver.name(),
            normalize_identifier(&candidate)
        );
        if let Some(source) = resolver.resolve(&candidate)? {
            debug!("{}: resolved {identifier} to {}", resolver.name(), source.uri());
            return Ok(Some(source));
        }
    }
    Ok(None)
}

/// Ordered list of strategies; the caller-side resolution loop.
#[derive(Default)]
pub struct ResolverChain {
    strategies: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl Resolver + 'static) -> Self {
        self.strategies.push(Box::new(resolver));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Try each strategy in order; `Ok(None)` if none of them has it.
    pub fn resolve_import(
        &self,
        parent: &ParentContext,
        identifier: &str,
    ) -> Result<Option<ResolvedSource>, StylepathError> {
        for strategy in &self.strategies {
            if let Some(source) = resolve_import(strategy.as_ref(), parent, identifier)? {
                return Ok(Some(source));
            }
        }
        Ok(None)
    }

    /// Every normalized URI the chain would try, in order.
    pub fn candidates(&self, parent: &ParentContext, identifier: &str) -> Vec<String> {
        self.strategies
            .iter()
            .flat_map(|s| s.build_candidates(parent, identifier))
            .map(|c| normalize_identifier(&c))
            .collect()
    }
}
