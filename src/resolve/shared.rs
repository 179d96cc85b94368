use crate::model::ParentContext;

/// Extension appended to identifiers that do not name plain CSS.
pub const DEFAULT_EXTENSION: &str = ".scss";

/// Extension that marks an identifier as already complete.
pub const CSS_EXTENSION: &str = ".css";

/// Append the default extension unless the identifier names a `.css` file.
pub fn normalize_identifier(identifier: &str) -> String {
    if identifier.ends_with(CSS_EXTENSION) {
        identifier.to_string()
    } else {
        format!("{identifier}{DEFAULT_EXTENSION}")
    }
}

/// Parent-relative candidate followed by one candidate per extra root.
///
/// A trailing `.scss` on the identifier is dropped first so that
/// normalization adds it back exactly once.
pub(super) fn candidates_with_roots(
    parent: &ParentContext,
    identifier: &str,
    roots: &[String],
) -> Vec<String> {
    let identifier = identifier
        .strip_suffix(DEFAULT_EXTENSION)
        .unwrap_or(identifier);

    let mut candidates = Vec::with_capacity(roots.len() + 1);
    if identifier.starts_with('/') {
        candidates.push(collapse_dots(identifier));
    } else {
        candidates.push(collapse_dots(&format!("{}{identifier}", parent.base_dir())));
    }
    for root in roots {
        candidates.push(join_root(root, identifier));
    }
    candidates
}

/// Concatenate a search root and an identifier with exactly one `/`.
pub(super) fn join_root(root: &str, identifier: &str) -> String {
    if root.is_empty() {
        return collapse_dots(identifier);
    }
    let joined = format!(
        "{}/{}",
        root.trim_end_matches('/'),
        identifier.trim_start_matches('/')
    );
    collapse_dots(&joined)
}

/// Remove `.` and empty segments and fold `..` into its parent.
///
/// A `scheme://` prefix is kept intact, as is a non-empty authority after
/// it (`file:///x` has none). Leading `..` segments of a relative path
/// survive; on an absolute path they stop at the root.
pub(crate) fn collapse_dots(path: &str) -> String {
    let (prefix, rest) = match path.find("://") {
        Some(pos) => path.split_at(pos + 3),
        None => ("", path),
    };
    let has_scheme = !prefix.is_empty();
    let absolute = rest.starts_with('/');
    let floor = usize::from(has_scheme && !absolute);

    let mut segments: Vec<&str> = Vec::new();
    for seg in rest.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if segments.len() > floor && segments.last() != Some(&"..") {
                    segments.pop();
                } else if !absolute && !has_scheme {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut out = String::with_capacity(path.len());
    out.push_str(prefix);
    if absolute {
        out.push('/');
    }
    out.push_str(&segments.join("/"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_identifier_leaves_css_alone() {
        for id in ["theme.css", "/abs/reset.css", "../vendor/grid.css"] {
            assert_eq!(normalize_identifier(id), id);
        }
    }

    #[test]
    fn normalize_identifier_appends_scss_once() {
        assert_eq!(normalize_identifier("mixins"), "mixins.scss");
        assert_eq!(normalize_identifier("/lib/vars"), "/lib/vars.scss");
        assert_eq!(normalize_identifier("theme.less"), "theme.less.scss");
        assert_eq!(normalize_identifier("a.scss").matches(".scss").count(), 2);
    }

    #[test]
    fn candidates_put_parent_first_then_roots_in_order() {
        let parent = ParentContext::new("/proj/a.scss");
        let roots = vec!["/lib/".to_string(), "/vendor".to_string()];
        let result = candidates_with_roots(&parent, "mixins", &roots);
        assert_eq!(result, vec!["/proj/mixins", "/lib/mixins", "/vendor/mixins"]);
    }

    #[test]
    fn candidates_without_roots_keep_default() {
        let parent = ParentContext::new("/proj/a.scss");
        assert_eq!(candidates_with_roots(&parent, "b", &[]), vec!["/proj/b"]);
    }

    #[test]
    fn candidates_strip_scss_suffix() {
        let parent = ParentContext::new("/proj/a.scss");
        assert_eq!(candidates_with_roots(&parent, "b.scss", &[]), vec!["/proj/b"]);
    }

    #[test]
    fn candidates_keep_duplicates() {
        let parent = ParentContext::new("/lib/a.scss");
        let roots = vec!["/lib/".to_string()];
        let result = candidates_with_roots(&parent, "x", &roots);
        assert_eq!(result, vec!["/lib/x", "/lib/x"]);
    }

    #[test]
    fn candidates_for_absolute_identifier() {
        let parent = ParentContext::new("/proj/a.scss");
        let roots = vec!["/lib".to_string()];
        let result = candidates_with_roots(&parent, "/shared/x", &roots);
        assert_eq!(result, vec!["/shared/x", "/lib/shared/x"]);
    }

    #[test]
    fn candidates_for_anonymous_parent_use_identifier() {
        let result = candidates_with_roots(&ParentContext::anonymous(), "x", &[]);
        assert_eq!(result, vec!["x"]);
    }

    #[test]
    fn collapse_dots_folds_parent_segments() {
        assert_eq!(collapse_dots("/proj/styles/../mixins"), "/proj/mixins");
        assert_eq!(collapse_dots("/proj/./a//b"), "/proj/a/b");
        assert_eq!(collapse_dots("/../x"), "/x");
        assert_eq!(collapse_dots("../../x"), "../../x");
        assert_eq!(collapse_dots("a/../../x"), "../x");
    }

    #[test]
    fn collapse_dots_keeps_scheme_and_authority() {
        assert_eq!(
            collapse_dots("http://cdn.example/a/../b"),
            "http://cdn.example/b"
        );
        assert_eq!(collapse_dots("http://cdn.example/../b"), "http://cdn.example/b");
    }

    #[test]
    fn collapse_dots_handles_empty_authority() {
        assert_eq!(collapse_dots("file:///proj/./mixins"), "file:///proj/mixins");
        assert_eq!(collapse_dots("file:///proj/../x"), "file:///x");
        assert_eq!(collapse_dots("file:///../x"), "file:///x");
    }

    #[test]
    fn candidates_for_file_uri_parent() {
        let parent = ParentContext::new("file:///proj/a.scss");
        let roots = vec!["file:///lib/".to_string()];
        let result = candidates_with_roots(&parent, "mixins", &roots);
        assert_eq!(result, vec!["file:///proj/mixins", "file:///lib/mixins"]);
    }

    #[test]
    fn join_root_uses_single_separator() {
        assert_eq!(join_root("/lib/", "mixins"), "/lib/mixins");
        assert_eq!(join_root("/lib", "mixins"), "/lib/mixins");
        assert_eq!(join_root("/", "mixins"), "/mixins");
        assert_eq!(join_root("", "mixins"), "mixins");
        assert_eq!(join_root("lib/", "../x"), "x");
    }
}
