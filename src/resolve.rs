use placename_types::PlaceNameRecord;

use crate::candidate::is_valid;
use crate::lexicon::Rules;

/// Every valid "{1-2 ideographs}{suffix}" span in `text`, left to right.
pub fn text_candidates<'a>(text: &'a str, rules: &Rules) -> Vec<&'a str> {
    rules
        .suffixed_name
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|name| is_valid(name, &rules.lexicon))
        .collect()
}

/// Re-check a closed record's name against its own accumulated text.
///
/// When the text holds valid names and the current name is either not
/// among them or not valid itself, the left-most one in the text replaces
/// it. Returns `None` when the final name still fails [`is_valid`].
pub fn resolve(mut record: PlaceNameRecord, rules: &Rules) -> Option<PlaceNameRecord> {
    let replacement = {
        let found = text_candidates(&record.text, rules);
        match found.first() {
            Some(first)
                if !found.contains(&record.placename.as_str())
                    || !is_valid(&record.placename, &rules.lexicon) =>
            {
                Some(first.to_string())
            }
            _ => None,
        }
    };

    if let Some(name) = replacement {
        record.placename = name;
    }

    is_valid(&record.placename, &rules.lexicon).then_some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Rules {
        Rules::builtin().unwrap()
    }

    #[test]
    fn test_name_absent_from_text_is_replaced() {
        let rec = PlaceNameRecord::new("武昌縣", "本漢舊縣 晉改曰武昌", "f1");
        let out = resolve(rec, &rules()).unwrap();
        assert_eq!(out.placename, "漢舊縣");
        assert_eq!(out.text, "本漢舊縣 晉改曰武昌");
    }

    #[test]
    fn test_invalid_name_takes_first_text_candidate() {
        let rec = PlaceNameRecord::new("江陵", "縣南百里有紀南城", "f1");
        assert_eq!(resolve(rec, &rules()).unwrap().placename, "紀南城");
    }

    #[test]
    fn test_valid_name_kept_without_text_candidates() {
        // "有麥城" is the only span and opens with a stop word
        let rec = PlaceNameRecord::new("當陽縣", "縣有麥城", "f1");
        assert_eq!(resolve(rec, &rules()).unwrap().placename, "當陽縣");
    }

    #[test]
    fn test_name_present_in_text_kept() {
        let rec = PlaceNameRecord::new("紀南城", "楚都紀南城 北接當陽縣", "f1");
        assert_eq!(resolve(rec, &rules()).unwrap().placename, "紀南城");
    }

    #[test]
    fn test_unresolvable_discarded() {
        let rec = PlaceNameRecord::new("武昌", "晉改曰武昌", "f1");
        assert_eq!(resolve(rec, &rules()), None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let r = rules();
        for (name, text) in [
            ("武昌縣", "本漢舊縣 晉改曰武昌"),
            ("江陵", "縣南百里有紀南城"),
            ("當陽縣", "縣有麥城"),
        ] {
            let once = resolve(PlaceNameRecord::new(name, text, "f1"), &r).unwrap();
            let twice = resolve(once.clone(), &r).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_text_candidates_filters_invalid() {
        let found = text_candidates("在江陵縣北，臨大江水", &rules());
        assert_eq!(found, vec!["大江水"]);
    }
}
