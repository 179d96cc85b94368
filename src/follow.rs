use std::collections::HashSet;
use std::path::Path;

use log::debug;

use crate::config;
use crate::error::StylepathError;
use crate::extract::extract_imports;
use crate::model::{ImportDirective, ImportKind, ParentContext};
use crate::output::{ImportNode, ImportTree, Outcome};
use crate::resolve::{FilesystemResolver, ResolverChain};
use crate::util::path_to_uri;

/// Configuration for follow mode.
#[derive(Debug, Clone, Default)]
pub struct FollowConfig {
    /// Import levels to expand; `None` follows everything.
    pub max_depth: Option<usize>,
    pub show_candidates: bool,
}

/// Resolve an entry stylesheet's imports recursively and print the tree.
///
/// `entry` is a file path, or an identifier resolved from the working
/// directory when no such file exists.
pub fn run(
    entry: &str,
    include_paths: &[String],
    config: &FollowConfig,
) -> Result<(), StylepathError> {
    let cwd = std::env::current_dir().map_err(|e| StylepathError::Io {
        path: ".".to_string(),
        source: e,
    })?;

    let path = Path::new(entry);
    let (uri, source, chain) = if path.exists() {
        let canonical = std::fs::canonicalize(path).map_err(|e| StylepathError::Io {
            path: entry.to_string(),
            source: e,
        })?;
        let chain = build_chain(canonical.parent(), include_paths);
        let bytes = std::fs::read(&canonical).map_err(|e| StylepathError::Io {
            path: entry.to_string(),
            source: e,
        })?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        (path_to_uri(&canonical), text, chain)
    } else {
        let chain = build_chain(Some(cwd.as_path()), include_paths);
        let resolved = chain
            .resolve_import(&ParentContext::anonymous(), entry)?
            .ok_or_else(|| StylepathError::NotFound(entry.to_string()))?;
        let uri = resolved.uri().to_string();
        (uri, resolved.read_text()?, chain)
    };

    let tree = build_tree(uri, &source, &chain, config);
    print!("{}", tree.display(&cwd));
    Ok(())
}

/// Filesystem chain: `stylepath.json` roots first, then `include_paths`.
pub fn build_chain(start_dir: Option<&Path>, include_paths: &[String]) -> ResolverChain {
    let mut roots = start_dir
        .and_then(config::load_config)
        .map(|cfg| {
            debug!("using {}", cfg.path.display());
            cfg.search_paths
        })
        .unwrap_or_default();
    roots.extend(include_paths.iter().map(|p| config::search_root(p)));
    ResolverChain::new().with(FilesystemResolver::new(roots))
}

/// Build the import tree for an already-loaded entry stylesheet.
pub fn build_tree(
    entry_uri: String,
    source: &str,
    chain: &ResolverChain,
    config: &FollowConfig,
) -> ImportTree {
    let mut visited = HashSet::new();
    visited.insert(visit_key(&entry_uri));
    let imports = expand(&entry_uri, source, 1, chain, config, &mut visited);
    ImportTree {
        entry: entry_uri,
        imports,
    }
}

/// Resolve the imports of one stylesheet; `depth` is their import level.
fn expand(
    parent_uri: &str,
    source: &str,
    depth: usize,
    chain: &ResolverChain,
    config: &FollowConfig,
    visited: &mut HashSet<String>,
) -> Vec<ImportNode> {
    let parent = ParentContext::new(parent_uri);
    extract_imports(source)
        .into_iter()
        .map(|directive| resolve_directive(directive, &parent, depth, chain, config, visited))
        .collect()
}

fn resolve_directive(
    directive: ImportDirective,
    parent: &ParentContext,
    depth: usize,
    chain: &ResolverChain,
    config: &FollowConfig,
    visited: &mut HashSet<String>,
) -> ImportNode {
    if directive.kind == ImportKind::PlainCss {
        return ImportNode::leaf(directive, Outcome::PlainCss, Vec::new());
    }

    let candidates = if config.show_candidates {
        chain.candidates(parent, &directive.target)
    } else {
        Vec::new()
    };

    let resolved = match chain.resolve_import(parent, &directive.target) {
        Ok(Some(source)) => source,
        Ok(None) => return ImportNode::leaf(directive, Outcome::NotFound, candidates),
        Err(e) => {
            debug!("{}: {e}", directive.target);
            return ImportNode::leaf(directive, Outcome::Failed(e.to_string()), candidates);
        }
    };

    let uri = resolved.uri().to_string();
    if !visited.insert(visit_key(&uri)) {
        return ImportNode::leaf(directive, Outcome::Revisited(uri), candidates);
    }
    if config.max_depth.is_some_and(|max| depth >= max) {
        return ImportNode::leaf(directive, Outcome::Resolved(uri), candidates);
    }

    match resolved.read_text() {
        Ok(text) => {
            let children = expand(&uri, &text, depth + 1, chain, config, visited);
            ImportNode {
                directive,
                outcome: Outcome::Resolved(uri),
                candidates,
                children,
            }
        }
        Err(e) => {
            debug!("{e}");
            ImportNode::leaf(directive, Outcome::Failed(e.to_string()), candidates)
        }
    }
}

/// Identity of an opened stylesheet for cycle detection.
fn visit_key(uri: &str) -> String {
    std::fs::canonicalize(uri).map_or_else(|_| uri.to_string(), |p| path_to_uri(&p))
}
