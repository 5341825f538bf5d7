use regex::Regex;
use std::sync::LazyLock;

use crate::lexicon::Rules;

/// Upper bound on rewrite passes over one line head.
pub const MAX_REWRITES: usize = 10;

/// Characters stripped after a removed prefix and before stored text.
pub const SEPARATORS: &[char] = &[' ', '；', '，', '。'];

// Line-number artifact left by the HTML conversion, e.g. "12 漢置…"
static RE_LINE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s*").unwrap());

pub fn strip_separators(s: &str) -> &str {
    s.trim_start_matches(SEPARATORS)
}

/// Strip dynasty, jurisdiction and verb scaffolding from the head of a line.
///
/// "漢置江陵縣屬南郡" → "江陵縣屬南郡"
///
/// Each pass tries every dynasty, then every admin-level span, then every
/// verb, in table order. Passes repeat until nothing changes or
/// [`MAX_REWRITES`] is reached; hitting the cap just returns the
/// partially stripped head.
pub fn normalize(line: &str, rules: &Rules) -> String {
    let numbered = RE_LINE_NUMBER.replace(line, "");
    let mut head: &str = numbered.trim();
    let lex = &rules.lexicon;

    for _ in 0..MAX_REWRITES {
        let before = head.len();

        for dynasty in &lex.dynasties {
            if let Some(rest) = head.strip_prefix(dynasty.as_str()) {
                head = strip_separators(rest);
            }
        }

        for span in &rules.admin_spans {
            if let Some(m) = span.find(head) {
                head = strip_separators(&head[m.end()..]);
            }
        }

        for verb in &lex.prefix_verbs {
            if let Some(rest) = head.strip_prefix(verb.as_str()) {
                head = strip_separators(rest);
            }
        }

        // Only prefixes are ever removed, so equal length means no change.
        if head.len() == before {
            break;
        }
    }

    head.to_string()
}
