use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

// ── Default lookup tables ────────────────────────────────────────────

/// Dynasty names that open a line of administrative history,
/// e.g. "漢置…", "後漢分…".
pub const DYNASTIES: &[&str] = &[
    "漢", "魏", "晉", "隋", "唐", "宋", "元", "明", "清", "秦", "齊", "梁", "周", "後漢", "元魏",
    "北齊",
];

/// Administrative-level markers. "{1-2 chars}{marker}" at line head is a
/// jurisdiction mention ("南郡", "荊州") and gets stripped.
pub const ADMIN_LEVELS: &[&str] = &["郡", "州", "府", "道", "路"];

/// Verbs of establishment / transfer / subordination that precede a name.
pub const PREFIX_VERBS: &[&str] = &[
    "置", "改", "分", "析", "移", "隸", "屬", "并", "於", "在", "本", "舊", "今", "尋", "此",
];

/// Function words and relational particles that never open a place name.
pub const STOP_WORDS: &[&str] = &[
    "在", "及", "与", "之", "其", "此", "旧", "从", "至", "界", "有", "谓",
];

/// Characters that terminate a place name. Order matters: the first
/// suffix that yields an acceptable candidate wins.
pub const SUFFIXES: &[&str] = &[
    // Jurisdictions
    "縣", "州", "郡", "府", "道",
    // Terrain and waters
    "山", "水", "河", "川", "原", "谷",
    // Built places and crossings
    "城", "關", "津", "坡", "陵", "宮", "溪", "岩", "潭",
];

/// Tokens that, directly after a candidate, mark a relation to a place
/// ("江陵縣南…", "…界") rather than its name.
pub const DIRECTIONS: &[&str] = &["南", "北", "西", "东", "治", "界"];

/// Regex character class for one ideograph of a generic name segment.
const IDEOGRAPH: &str = "[一-龥]";

// ── Configurable tables ──────────────────────────────────────────────

/// The lookup tables driving normalization and candidate detection.
///
/// Loaded from JSON; any table missing from the file keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub dynasties: Vec<String>,
    pub admin_levels: Vec<String>,
    pub prefix_verbs: Vec<String>,
    pub stop_words: Vec<String>,
    pub suffixes: Vec<String>,
    pub directions: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            dynasties: owned(DYNASTIES),
            admin_levels: owned(ADMIN_LEVELS),
            prefix_verbs: owned(PREFIX_VERBS),
            stop_words: owned(STOP_WORDS),
            suffixes: owned(SUFFIXES),
            directions: owned(DIRECTIONS),
        }
    }
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

impl Lexicon {
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let json = fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
        serde_json::from_str(&json).map_err(|source| ExtractError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clean the tables and build the patterns derived from them.
    pub fn compile(&self) -> Result<Rules, ExtractError> {
        let lexicon = Lexicon {
            dynasties: cleaned(&self.dynasties),
            admin_levels: cleaned(&self.admin_levels),
            prefix_verbs: cleaned(&self.prefix_verbs),
            stop_words: cleaned(&self.stop_words),
            suffixes: cleaned(&self.suffixes),
            directions: cleaned(&self.directions),
        };
        if lexicon.suffixes.is_empty() {
            return Err(ExtractError::EmptyTable("suffixes"));
        }

        let admin_spans = lexicon
            .admin_levels
            .iter()
            .map(|admin| Regex::new(&format!("^{IDEOGRAPH}{{1,2}}{}", regex::escape(admin))))
            .collect::<Result<Vec<_>, _>>()?;

        let suffix_alts: Vec<String> = lexicon.suffixes.iter().map(|s| regex::escape(s)).collect();
        let suffixed_name = Regex::new(&format!(
            "{IDEOGRAPH}{{1,2}}(?:{})",
            suffix_alts.join("|")
        ))?;

        Ok(Rules {
            lexicon,
            admin_spans,
            suffixed_name,
        })
    }
}

/// Trim tokens and drop blanks, keeping table order.
fn cleaned(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether `s` begins with any token of `table`.
pub fn starts_with_any(s: &str, table: &[String]) -> bool {
    table.iter().any(|t| s.starts_with(t.as_str()))
}

// ── Compiled form ────────────────────────────────────────────────────

/// Cleaned lookup tables plus the patterns built from them.
#[derive(Debug, Clone)]
pub struct Rules {
    pub lexicon: Lexicon,
    /// `^{1-2 ideographs}{admin}`, one per admin level, in table order
    pub admin_spans: Vec<Regex>,
    /// `{1-2 ideographs}(?:suffix|…)`, unanchored
    pub suffixed_name: Regex,
}

impl Rules {
    /// Rules built from the built-in tables.
    pub fn builtin() -> Result<Self, ExtractError> {
        Lexicon::default().compile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_suffix_order() {
        let lex = Lexicon::default();
        assert_eq!(lex.suffixes.first().map(String::as_str), Some("縣"));
        assert_eq!(lex.suffixes.last().map(String::as_str), Some("潭"));
        assert_eq!(lex.suffixes.len(), 20);
        assert_eq!(lex.dynasties.len(), 16);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let lex: Lexicon = serde_json::from_str(r#"{"suffixes": ["山", "縣"]}"#).unwrap();
        assert_eq!(lex.suffixes, vec!["山".to_string(), "縣".to_string()]);
        assert_eq!(lex.dynasties, Lexicon::default().dynasties);
    }

    #[test]
    fn test_compile_drops_blank_tokens() {
        let lex = Lexicon {
            stop_words: vec!["".into(), " 其 ".into()],
            ..Lexicon::default()
        };
        let rules = lex.compile().unwrap();
        assert_eq!(rules.lexicon.stop_words, vec!["其".to_string()]);
    }

    #[test]
    fn test_empty_suffixes_rejected() {
        let lex = Lexicon {
            suffixes: vec![" ".into()],
            ..Lexicon::default()
        };
        assert!(matches!(
            lex.compile(),
            Err(ExtractError::EmptyTable("suffixes"))
        ));
    }

    #[test]
    fn test_admin_span_pattern() {
        let rules = Rules::builtin().unwrap();
        let zhou = &rules.admin_spans[1];
        assert_eq!(zhou.find("荊州刺史").map(|m| m.as_str()), Some("荊州"));
        assert_eq!(zhou.find("南荊州").map(|m| m.as_str()), Some("南荊州"));
        assert!(zhou.find("至荊南州").is_none());
    }

    #[test]
    fn test_suffixed_name_pattern() {
        let rules = Rules::builtin().unwrap();
        let found: Vec<&str> = rules
            .suffixed_name
            .find_iter("在江陵縣北，臨大江水")
            .map(|m| m.as_str())
            .collect();
        // leftmost match wins, so "在" is swallowed; validation filters it later
        assert_eq!(found, vec!["在江陵", "大江水"]);
    }

    #[test]
    fn test_load_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        fs::write(&path, r#"{"directions": ["東"]}"#).unwrap();
        let lex = Lexicon::load(&path).unwrap();
        assert_eq!(lex.directions, vec!["東".to_string()]);

        fs::write(&path, "not json").unwrap();
        assert!(matches!(Lexicon::load(&path), Err(ExtractError::Json { .. })));
    }
}
