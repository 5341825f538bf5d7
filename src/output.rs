use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use placename_types::{PlaceNameRecord, SourceSummary};

use crate::error::ExtractError;

/// UTF-8 byte-order mark, so spreadsheet tools pick the right encoding.
const BOM: &[u8] = b"\xEF\xBB\xBF";

const HEADER: [&str; 3] = ["placename", "text", "source"];

/// Write records as a quoted `placename,text,source` table.
pub fn write_records_to<W: Write>(mut out: W, records: &[PlaceNameRecord]) -> Result<(), csv::Error> {
    out.write_all(BOM)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(out);
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_records(path: &Path, records: &[PlaceNameRecord]) -> Result<(), ExtractError> {
    let file = File::create(path).map_err(|e| ExtractError::io(path, e))?;
    write_records_to(BufWriter::new(file), records).map_err(|source| ExtractError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a table written by [`write_records_to`]; a leading BOM is optional.
pub fn read_records_from<R: Read>(mut input: R) -> Result<Vec<PlaceNameRecord>, csv::Error> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let body = bytes.strip_prefix(BOM).unwrap_or(&bytes);

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(body);
    reader.deserialize().collect()
}

pub fn read_records(path: &Path) -> Result<Vec<PlaceNameRecord>, ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    read_records_from(file).map_err(|source| ExtractError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Per-document statistics as pretty JSON.
pub fn write_summary(path: &Path, summaries: &[SourceSummary]) -> Result<(), ExtractError> {
    let json = serde_json::to_string_pretty(summaries).map_err(|source| ExtractError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|e| ExtractError::io(path, e))
}
