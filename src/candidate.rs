use crate::lexicon::{Lexicon, Rules, starts_with_any};
use crate::normalize::normalize;

/// Candidate length accepted at line head.
const HEAD_NAME_CHARS: std::ops::RangeInclusive<usize> = 2..=3;

/// Name length accepted by [`is_valid`].
const VALID_NAME_CHARS: std::ops::RangeInclusive<usize> = 2..=4;

/// Normalize a raw line and look for a place name at its head.
pub fn detect(line: &str, rules: &Rules) -> Option<String> {
    let head = normalize(line, rules);
    find_candidate(&head, rules).map(str::to_string)
}

/// Find a place name opening an already normalized line head.
///
/// Suffixes are tried in table order. For each one present in the line,
/// the candidate runs from line start through its first occurrence. The
/// candidate is accepted when it is 2-3 characters long, does not open
/// with a stop word, and is not immediately followed by a direction
/// token ("江陵縣南…" locates something relative to 江陵縣).
pub fn find_candidate<'a>(head: &'a str, rules: &Rules) -> Option<&'a str> {
    let lex = &rules.lexicon;
    if head.is_empty() {
        return None;
    }

    for suffix in &lex.suffixes {
        let Some(idx) = head.find(suffix.as_str()) else {
            continue;
        };
        let end = idx + suffix.len();
        let name = &head[..end];

        if !HEAD_NAME_CHARS.contains(&name.chars().count()) {
            continue;
        }
        if starts_with_any(name, &lex.stop_words) {
            continue;
        }

        let after = &head[end..];
        if let Some(next) = after.chars().next() {
            if !is_separator(next) && starts_with_any(after, &lex.directions) {
                continue;
            }
        }

        return Some(name);
    }

    None
}

/// Punctuation or whitespace that ends a name cleanly.
fn is_separator(c: char) -> bool {
    matches!(c, '，' | '。' | '；') || c.is_whitespace()
}

/// Whether `name` can stand as a resolved place name: 2-4 characters,
/// no leading stop word, ending in a known suffix.
pub fn is_valid(name: &str, lex: &Lexicon) -> bool {
    VALID_NAME_CHARS.contains(&name.chars().count())
        && !starts_with_any(name, &lex.stop_words)
        && lex.suffixes.iter().any(|s| name.ends_with(s.as_str()))
}
