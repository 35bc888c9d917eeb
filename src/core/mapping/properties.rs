// ─── Properties Reader ───
// Line-oriented `key = value` entries with Java-properties escapes and continuations.

/// A syntax problem found while reading a properties source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based line where the offending entry starts.
    pub line: usize,
    pub reason: String,
}

/// A single `key = value` entry with escapes already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub line: usize,
    pub key: String,
    pub value: String,
}

/// Parse a properties source into its entries, in file order.
///
/// The key ends at the first unescaped `=`. Lines without one fall back to the
/// first unescaped `:` or whitespace, so coordinate keys such as
/// `org.foo:bar:1.0 = /libs/bar.jar` keep their colons.
pub fn parse(source: &str) -> Result<Vec<Entry>, SyntaxError> {
    let mut entries = Vec::new();
    let mut lines = source.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let start_line = idx + 1;
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        // Join continuation lines: an odd number of trailing backslashes.
        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_entry(&logical);
        let key = unescape(raw_key.trim()).map_err(|reason| SyntaxError {
            line: start_line,
            reason,
        })?;
        let value = unescape(raw_value.trim()).map_err(|reason| SyntaxError {
            line: start_line,
            reason,
        })?;

        entries.push(Entry {
            line: start_line,
            key,
            value,
        });
    }

    Ok(entries)
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    trailing % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    if let Some(idx) = find_unescaped(line, |c| c == '=') {
        return (&line[..idx], &line[idx + 1..]);
    }

    match find_unescaped(line, |c| c == ':' || c.is_whitespace()) {
        Some(idx) => {
            let sep_len = line[idx..].chars().next().map_or(1, char::len_utf8);
            let rest = line[idx + sep_len..].trim_start();
            // `key  : value` uses the colon as the separator, not the whitespace.
            let rest = rest.strip_prefix(':').unwrap_or(rest);
            (&line[..idx], rest)
        }
        None => (line, ""),
    }
}

fn find_unescaped(line: &str, is_sep: impl Fn(char) -> bool) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if is_sep(c) {
            return Some(idx);
        }
    }
    None
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid unicode escape '\\u{}'", hex))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(source: &str) -> Vec<(String, String)> {
        parse(source)
            .unwrap()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect()
    }

    #[test]
    fn coordinate_keys_keep_their_colons() {
        assert_eq!(
            pairs("org.foo:bar:1.0 = /libs/bar-1.0.jar"),
            vec![("org.foo:bar:1.0".into(), "/libs/bar-1.0.jar".into())]
        );
    }

    #[test]
    fn escaped_colons_are_decoded() {
        assert_eq!(
            pairs(r"org.robolectric\:android-all\:14=/sdk/android-all-14.jar"),
            vec![(
                "org.robolectric:android-all:14".into(),
                "/sdk/android-all-14.jar".into()
            )]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let source = "# generated\n\n   ! legacy comment\na=1\n";
        let entries = parse(source).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, 4);
    }

    #[test]
    fn colon_and_whitespace_separators_without_equals() {
        assert_eq!(pairs("alpha: one"), vec![("alpha".into(), "one".into())]);
        assert_eq!(pairs("beta   two"), vec![("beta".into(), "two".into())]);
        assert_eq!(pairs("gamma  :  three"), vec![("gamma".into(), "three".into())]);
        assert_eq!(pairs("delta"), vec![("delta".into(), "".into())]);
    }

    #[test]
    fn continuation_lines_are_joined() {
        let source = "org.foo:bar:1.0 = /libs/bar-1.0.jar:\\\n    /libs/bar-1.0-sources.jar\nnext=x";
        assert_eq!(
            pairs(source),
            vec![
                (
                    "org.foo:bar:1.0".into(),
                    "/libs/bar-1.0.jar:/libs/bar-1.0-sources.jar".into()
                ),
                ("next".into(), "x".into()),
            ]
        );
    }

    #[test]
    fn escaped_backslash_is_not_a_continuation() {
        assert_eq!(
            pairs("path=C\\:\\\\libs\\\\\nother=1"),
            vec![
                ("path".into(), "C:\\libs\\".into()),
                ("other".into(), "1".into())
            ]
        );
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(pairs("k=caf\\u00e9"), vec![("k".into(), "café".into())]);

        let err = parse("ok=1\nbad=\\u12").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("unicode"));
    }
}
