use std::path::Path;

/// Render a filesystem path as a `/`-separated URI string.
pub fn path_to_uri(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if cfg!(windows) {
        raw.replace('\\', "/")
    } else {
        raw.into_owned()
    }
}

/// Shorten a URI relative to `base` for display, falling back to the input.
pub fn display_uri(uri: &str, base: &Path) -> String {
    let base = path_to_uri(base);
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return uri.to_string();
    }
    uri.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .map_or_else(|| uri.to_string(), str::to_string)
}

/// Strip surrounding quotes (`'`, `"`) from a string literal.
pub fn trim_quotes(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\'' || c == '"')
}
