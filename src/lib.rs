//! Place-name record extraction for classical gazetteer text.
//!
//! A document is scanned line by line: each line head is stripped of
//! dynasty / jurisdiction / verb scaffolding ([`normalize`]), checked for a
//! suffix-bounded place name ([`candidate`]), and attributed to the
//! currently open record ([`aggregate`]). Closed records are re-checked
//! against their own text before being emitted ([`resolve`]).

pub mod aggregate;
pub mod candidate;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod output;
pub mod resolve;
pub mod scanner;

pub use aggregate::{DocumentExtraction, extract, extract_document};
pub use error::ExtractError;
pub use lexicon::{Lexicon, Rules};
pub use placename_types::{PlaceNameRecord, SourceSummary};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_corpus_to_table() {
        let corpus = tempfile::tempdir().unwrap();
        fs::write(
            corpus.path().join("2.txt"),
            "1 漢置江陵縣屬南郡\n其水南流\n\n華容縣\n，故容城\n",
        )
        .unwrap();
        fs::write(corpus.path().join("10.txt"), "其水南流\n晉改曰武昌\n").unwrap();

        let rules = Rules::builtin().unwrap();
        let mut records = Vec::new();
        for doc in scanner::scan_documents(corpus.path()).unwrap() {
            let lines = doc.read_lines().unwrap();
            records.extend(extract(&lines, &doc.source, &rules));
        }

        assert_eq!(
            records,
            vec![
                PlaceNameRecord::new("屬南郡", "屬南郡 其水南流", "2"),
                PlaceNameRecord::new("故容城", "故容城", "2"),
            ]
        );

        let table = corpus.path().join("out.csv");
        output::write_records(&table, &records).unwrap();
        assert_eq!(output::read_records(&table).unwrap(), records);
    }
}
