//! `@import` scanning.
//!
//! Only the import directives of a stylesheet are of interest here, so a
//! text scan is enough: comments are blanked out first (keeping newlines so
//! line numbers survive), then every `@import` outside a string literal is
//! parsed up to its terminating `;`.

use crate::model::{ImportDirective, ImportKind};
use crate::resolve::CSS_EXTENSION;
use crate::util::trim_quotes;

const IMPORT_KEYWORD: &[u8] = b"import";

/// A raw target before classification.
struct RawTarget {
    value: String,
    offset: usize,
    is_url: bool,
}

/// Extract every `@import` target in source order.
pub fn extract_imports(src: &str) -> Vec<ImportDirective> {
    let text = strip_comments(src);
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_string(bytes, i),
            b'@' if is_import_keyword(bytes, i + 1) => {
                i = parse_directive(&text, i + 1 + IMPORT_KEYWORD.len(), &mut out);
            }
            _ => i += 1,
        }
    }

    out
}

/// Parse the target list after `@import`; returns where scanning resumes.
fn parse_directive(text: &str, start: usize, out: &mut Vec<ImportDirective>) -> usize {
    let bytes = text.as_bytes();
    let mut targets = Vec::new();
    let mut i = start;

    loop {
        i = skip_whitespace(bytes, i);
        let Some(&b) = bytes.get(i) else {
            break;
        };

        if b == b'"' || b == b'\'' {
            let end = skip_string(bytes, i);
            targets.push(RawTarget {
                value: trim_quotes(&text[i..end]).to_string(),
                offset: i,
                is_url: false,
            });
            i = end;
        } else if starts_with_ignore_case(bytes, i, b"url(") {
            let inner_start = i + 4;
            let inner_end = text[inner_start..]
                .find(')')
                .map_or(bytes.len(), |p| inner_start + p);
            targets.push(RawTarget {
                value: trim_quotes(text[inner_start..inner_end].trim()).to_string(),
                offset: i,
                is_url: true,
            });
            i = (inner_end + 1).min(bytes.len());
        } else {
            break;
        }

        let after_target = i;
        i = skip_whitespace(bytes, i);
        if bytes.get(i) == Some(&b',') {
            i += 1;
        } else {
            i = after_target;
            break;
        }
    }

    // Anything left on the same line before the terminator is a media query.
    // A newline ends the directive so a missing `;` does not swallow the
    // next rule.
    let stop = text[i..]
        .find(&[';', '{', '}', '\n'][..])
        .map_or(bytes.len(), |p| i + p);
    let has_media = !text[i..stop].trim().is_empty();

    for target in targets {
        if target.value.is_empty() {
            continue;
        }
        out.push(ImportDirective {
            kind: classify(&target.value, target.is_url, has_media),
            line: line_of(text, target.offset),
            target: target.value,
        });
    }

    if bytes.get(stop) == Some(&b';') {
        stop + 1
    } else {
        stop
    }
}

/// Decide whether a target is left to the browser as a CSS `@import`.
fn classify(target: &str, is_url: bool, has_media: bool) -> ImportKind {
    let plain = is_url
        || has_media
        || target.ends_with(CSS_EXTENSION)
        || target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with("//");
    if plain {
        ImportKind::PlainCss
    } else {
        ImportKind::Stylesheet
    }
}

/// Blank out `//` and `/* */` comments, keeping strings, `url(...)` bodies
/// and newlines intact.
fn strip_comments(src: &str) -> String {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut out = Vec::with_capacity(len);
    let mut i = 0;

    while i < len {
        let ch = bytes[i];

        if ch == b'"' || ch == b'\'' {
            let end = skip_string(bytes, i);
            out.extend_from_slice(&bytes[i..end]);
            i = end;
            continue;
        }

        // url(//cdn/...) must not be read as a line comment
        if starts_with_ignore_case(bytes, i, b"url(") {
            let end = bytes[i..]
                .iter()
                .position(|&b| b == b')')
                .map_or(len, |p| i + p + 1);
            out.extend_from_slice(&bytes[i..end]);
            i = end;
            continue;
        }

        if ch == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < len && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        if ch == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i += 2;
            while i < len && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                if bytes[i] == b'\n' {
                    out.push(b'\n');
                }
                i += 1;
            }
            i = (i + 2).min(len);
            out.push(b' ');
            continue;
        }

        out.push(ch);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Index just past the string literal starting at `start`.
///
/// An unterminated string ends at the next newline.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

fn is_import_keyword(bytes: &[u8], at: usize) -> bool {
    let end = at + IMPORT_KEYWORD.len();
    starts_with_ignore_case(bytes, at, IMPORT_KEYWORD)
        && !bytes
            .get(end)
            .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn starts_with_ignore_case(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|w| w.eq_ignore_ascii_case(needle))
}

fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(src: &str) -> Vec<(String, usize, ImportKind)> {
        extract_imports(src)
            .into_iter()
            .map(|d| (d.target, d.line, d.kind))
            .collect()
    }

    #[test]
    fn extracts_single_import() {
        assert_eq!(
            targets("@import \"mixins\";\n.a { color: red; }"),
            vec![("mixins".to_string(), 1, ImportKind::Stylesheet)]
        );
    }

    #[test]
    fn extracts_comma_separated_list() {
        let result = targets("$x: 1;\n@import 'vars', \"grid/base\";");
        assert_eq!(
            result,
            vec![
                ("vars".to_string(), 2, ImportKind::Stylesheet),
                ("grid/base".to_string(), 2, ImportKind::Stylesheet),
            ]
        );
    }

    #[test]
    fn classifies_plain_css_imports() {
        let src = "@import \"reset.css\";\n\
                   @import url(theme);\n\
                   @import \"https://fonts.example/x\";\n\
                   @import \"print\" print;";
        let kinds: Vec<ImportKind> = extract_imports(src).into_iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![ImportKind::PlainCss; 4]);
    }

    #[test]
    fn url_with_protocol_relative_target_is_not_a_comment() {
        let result = targets("@import url(//fonts.example/css);\n@import \"after\";");
        assert_eq!(
            result,
            vec![
                ("//fonts.example/css".to_string(), 1, ImportKind::PlainCss),
                ("after".to_string(), 2, ImportKind::Stylesheet),
            ]
        );
    }

    #[test]
    fn ignores_commented_imports() {
        let src = "// @import \"line\";\n/* @import \"block\";\n */\n@import \"real\";";
        assert_eq!(
            targets(src),
            vec![("real".to_string(), 4, ImportKind::Stylesheet)]
        );
    }

    #[test]
    fn ignores_import_text_inside_strings() {
        let src = ".a::before { content: \"@import 'x';\"; }";
        assert!(extract_imports(src).is_empty());
    }

    #[test]
    fn keyword_must_stand_alone() {
        assert!(extract_imports("@imports \"x\";").is_empty());
        assert_eq!(extract_imports("@IMPORT \"x\";").len(), 1);
    }

    #[test]
    fn missing_semicolon_at_end_of_input() {
        assert_eq!(
            targets("@import \"last\""),
            vec![("last".to_string(), 1, ImportKind::Stylesheet)]
        );
    }

    #[test]
    fn missing_semicolon_before_next_rule_is_stylesheet() {
        let src = "@import \"a\"\n.b { c: d; }\n@import \"e\";";
        assert_eq!(
            targets(src),
            vec![
                ("a".to_string(), 1, ImportKind::Stylesheet),
                ("e".to_string(), 3, ImportKind::Stylesheet),
            ]
        );
    }

    #[test]
    fn media_query_on_same_line_marks_plain_css() {
        let src = "@import \"print\" print, screen and (max-width: 600px);";
        assert_eq!(extract_imports(src)[0].kind, ImportKind::PlainCss);
    }

    #[test]
    fn nested_import_inside_rule() {
        let src = ".theme {\n  @import \"colors\";\n}";
        assert_eq!(
            targets(src),
            vec![("colors".to_string(), 2, ImportKind::Stylesheet)]
        );
    }
}
