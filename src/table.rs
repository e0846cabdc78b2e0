// pertmap/src/table.rs

//! Whitespace separated text tables shared by every list file format.

use csv::{Reader, ReaderBuilder, StringRecord, Trim, Writer, WriterBuilder};
use std::io::{Read, Write};

pub(crate) fn table_reader<R: Read>(rdr: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(rdr)
}

pub(crate) fn table_writer<W: Write>(wtr: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(wtr)
}

/// Non-empty tokens of a record; runs of spaces and tabs count as one separator.
pub(crate) fn tokens(record: &StringRecord) -> Vec<&str> {
    record.iter().flat_map(|field| field.split_whitespace()).collect()
}

pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

pub(crate) fn parse_f64(token: &str, line: u64) -> Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|e| format!("line {}: could not parse '{}' as a number ({})", line, token, e))
}
