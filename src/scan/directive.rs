// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ignore directive detection.
//!
//! `syn` drops ordinary comments, so the directive is found in the raw
//! source. The scan walks the text once, skipping string and character
//! literals, and checks the body of every comment.

/// Text that marks a unit as ignored.
pub const IGNORE_DIRECTIVE: &str = "marlow:ignore";

/// Whether any comment in `source` contains the ignore directive.
pub fn has_ignore_directive(source: &str) -> bool {
    if !source.contains(IGNORE_DIRECTIVE) {
        return false;
    }

    let bytes = source.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                let end = find_line_end(bytes, pos);
                if source[pos..end].contains(IGNORE_DIRECTIVE) {
                    return true;
                }
                pos = end;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                let end = find_block_end(bytes, pos);
                if source[pos..end].contains(IGNORE_DIRECTIVE) {
                    return true;
                }
                pos = end;
            }
            b'r' if is_raw_string_start(bytes, pos) => {
                pos = skip_raw_string(bytes, pos);
            }
            b'"' => pos = skip_string(bytes, pos),
            b'\'' => pos = skip_char(bytes, pos),
            _ => pos += 1
        }
    }
    false
}

fn find_line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| start + offset)
}

/// Block comments nest in Rust.
fn find_block_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut pos = start;
    while pos + 1 < bytes.len() {
        match (bytes[pos], bytes[pos + 1]) {
            (b'/', b'*') => {
                depth += 1;
                pos += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                pos += 2;
                if depth == 0 {
                    return pos;
                }
            }
            _ => pos += 1
        }
    }
    bytes.len()
}

fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return pos + 1,
            _ => pos += 1
        }
    }
    bytes.len()
}

fn is_raw_string_start(bytes: &[u8], pos: usize) -> bool {
    if pos > 0 && (bytes[pos - 1].is_ascii_alphanumeric() || bytes[pos - 1] == b'_') {
        return false;
    }
    let mut next = pos + 1;
    while bytes.get(next) == Some(&b'#') {
        next += 1;
    }
    bytes.get(next) == Some(&b'"')
}

fn skip_raw_string(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    let mut hashes = 0;
    while bytes.get(pos) == Some(&b'#') {
        hashes += 1;
        pos += 1;
    }
    pos += 1;
    while pos < bytes.len() {
        if bytes[pos] == b'"'
            && bytes[pos + 1..]
                .iter()
                .take(hashes)
                .filter(|&&b| b == b'#')
                .count()
                == hashes
        {
            return pos + 1 + hashes;
        }
        pos += 1;
    }
    bytes.len()
}

/// Skips a character literal; a lone quote is a lifetime and is stepped over.
fn skip_char(bytes: &[u8], start: usize) -> usize {
    match (bytes.get(start + 1), bytes.get(start + 2)) {
        (Some(b'\\'), _) => {
            let mut pos = start + 2;
            while pos < bytes.len() && bytes[pos] != b'\'' {
                pos += 1;
            }
            pos + 1
        }
        (Some(_), Some(b'\'')) => start + 3,
        _ => start + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_comment() {
        assert!(has_ignore_directive("// marlow:ignore\nstruct A { a: i64 }"));
    }

    #[test]
    fn inner_doc_comment() {
        assert!(has_ignore_directive("//! marlow:ignore\n"));
    }

    #[test]
    fn nested_block_comment() {
        assert!(has_ignore_directive("/* outer /* inner */ marlow:ignore */"));
    }

    #[test]
    fn string_literal_is_not_a_comment() {
        let source = r#"const TAG: &str = "// marlow:ignore";"#;
        assert!(!has_ignore_directive(source));
    }

    #[test]
    fn raw_string_literal_is_not_a_comment() {
        let source = "const TAG: &str = r##\"/* marlow:ignore */\"##;";
        assert!(!has_ignore_directive(source));
    }

    #[test]
    fn lifetimes_do_not_open_char_literals() {
        let source = "struct A<'a> { a: &'a str } // marlow:ignore";
        assert!(has_ignore_directive(source));
    }

    #[test]
    fn quote_char_literal() {
        let source = "const Q: char = '\"'; // marlow:ignore";
        assert!(has_ignore_directive(source));
    }

    #[test]
    fn absent() {
        assert!(!has_ignore_directive("struct A { a: i64 }"));
    }
}
