//! `stylepath` — stylesheet `@import` resolution.
//!
//! Resolves the targets of `@import` directives to concrete stylesheets by
//! probing an ordered list of candidates: the importing stylesheet's own
//! directory first, then configured search roots. Lookup strategies are
//! pluggable through [`Resolver`] and composed with [`ResolverChain`].

pub mod config;
pub mod error;
pub mod extract;
pub mod follow;
pub mod model;
pub mod output;
pub mod resolve;
pub mod util;

pub use error::StylepathError;
pub use model::{ImportDirective, ImportKind, ParentContext, ResolvedSource};
pub use resolve::{
    normalize_identifier, resolve_import, EmbeddedResolver, FilesystemResolver, Resolver,
    ResolverChain,
};
