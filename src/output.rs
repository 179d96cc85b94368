use std::fmt;
use std::path::Path;

use crate::model::ImportDirective;
use crate::util::display_uri;

/// What happened to one `@import` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(String),
    /// Resolved to a stylesheet already shown elsewhere in the tree.
    Revisited(String),
    NotFound,
    PlainCss,
    Failed(String),
}

/// A node in the import tree.
#[derive(Debug, Clone)]
pub struct ImportNode {
    pub directive: ImportDirective,
    pub outcome: Outcome,
    /// Candidate URIs tried, only collected on request.
    pub candidates: Vec<String>,
    pub children: Vec<ImportNode>,
}

impl ImportNode {
    pub(crate) fn leaf(
        directive: ImportDirective,
        outcome: Outcome,
        candidates: Vec<String>,
    ) -> Self {
        Self {
            directive,
            outcome,
            candidates,
            children: Vec::new(),
        }
    }
}

/// Resolved imports of an entry stylesheet.
#[derive(Debug, Clone)]
pub struct ImportTree {
    pub entry: String,
    pub imports: Vec<ImportNode>,
}

impl ImportTree {
    /// Display with paths shortened relative to `base`.
    pub fn display<'a>(&'a self, base: &'a Path) -> TreeDisplay<'a> {
        TreeDisplay { tree: self, base }
    }
}

pub struct TreeDisplay<'a> {
    tree: &'a ImportTree,
    base: &'a Path,
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.tree.imports.len();
        let noun = if count == 1 { "import" } else { "imports" };
        writeln!(
            f,
            "{}  ({count} {noun})",
            display_uri(&self.tree.entry, self.base)
        )?;

        if !self.tree.imports.is_empty() {
            writeln!(f, "│")?;
            write_nodes(f, &self.tree.imports, "", self.base)?;
        }
        Ok(())
    }
}

/// Render nodes with box-drawing characters.
fn write_nodes(
    f: &mut fmt::Formatter<'_>,
    nodes: &[ImportNode],
    prefix: &str,
    base: &Path,
) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == nodes.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let continuation = if is_last { "    " } else { "│   " };

        write!(
            f,
            "{prefix}{connector}{:?}  [L{}]",
            node.directive.target, node.directive.line
        )?;
        match &node.outcome {
            Outcome::Resolved(uri) => writeln!(f, " → {}", display_uri(uri, base))?,
            Outcome::Revisited(uri) => {
                writeln!(f, " → {} (already shown)", display_uri(uri, base))?;
            }
            Outcome::NotFound => writeln!(f, " ✗ not found")?,
            Outcome::PlainCss => writeln!(f, " (plain css)")?,
            Outcome::Failed(msg) => writeln!(f, " ✗ {msg}")?,
        }

        for candidate in &node.candidates {
            writeln!(f, "{prefix}{continuation}  tried: {}", display_uri(candidate, base))?;
        }

        if !node.children.is_empty() {
            let sub_prefix = format!("{prefix}{continuation}");
            write_nodes(f, &node.children, &sub_prefix, base)?;
        }
    }
    Ok(())
}
