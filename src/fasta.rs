//! FASTA input for pre-filling the form.
//!
//! Supports both single-line and multi-line sequences. Only the first two
//! records matter to the viewer, see [`read_pair`].
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! MKVLAAGIVG...
//! >another_sequence
//! MKVLSAGIVG...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Expected at least two sequences, found {0}")]
    NotAPair(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// A single FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Identifier (header up to the first whitespace, without '>')
    pub id: String,
    pub sequence: String,
}

impl Record {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }
}

/// Parses a FASTA file into records.
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<Record>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    parse_fasta(reader)
}

/// Parses FASTA content from a reader.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<Record>> {
    let mut records = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_seq = String::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                if !current_seq.is_empty() {
                    records.push(Record::new(id, std::mem::take(&mut current_seq)));
                }
            }

            let id = header.split_whitespace().next().unwrap_or("").to_string();
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_id = Some(id);
            current_seq.clear();
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }
            current_seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if let Some(id) = current_id {
        if !current_seq.is_empty() {
            records.push(Record::new(id, current_seq));
        }
    }

    if records.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(records)
}

/// Parses FASTA content from a string.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<Record>> {
    parse_fasta(content.as_bytes())
}

/// Reads the first two records of a FASTA file.
///
/// Records past the second are ignored. Sequences are returned as written;
/// validation and case normalization happen on submission.
pub fn read_pair<P: AsRef<Path>>(path: P) -> FastaResult<(Record, Record)> {
    pair_from(parse_fasta_file(path)?)
}

fn pair_from(records: Vec<Record>) -> FastaResult<(Record, Record)> {
    let count = records.len();
    let mut iter = records.into_iter();
    match (iter.next(), iter.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(FastaError::NotAPair(count)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_simple_fasta() {
        let content = ">seq1\nARND\n>seq2\nCQEG\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new("seq1", "ARND"));
        assert_eq!(records[1], Record::new("seq2", "CQEG"));
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let content = ">seq1\nMKVL\nAAGI\nVG\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, "MKVLAAGIVG");
    }

    #[test]
    fn test_parse_with_description_and_blank_lines() {
        let content = ">seq1 human kinase\nMK V\n\n>seq2\n\nMRV\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].sequence, "MKV");
        assert_eq!(records[1].sequence, "MRV");
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_fasta_str(""), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_empty_identifier() {
        let result = parse_fasta_str(">\nARN\n");
        assert!(matches!(result, Err(FastaError::InvalidFormat(_))));
    }

    #[test]
    fn test_sequence_without_header() {
        let result = parse_fasta_str("ARND\n>seq1\nARND\n");
        assert!(matches!(result, Err(FastaError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_case_preserved() {
        let records = parse_fasta_str(">seq1\narnd\n").unwrap();
        assert_eq!(records[0].sequence, "arnd");
    }

    #[test]
    fn test_read_pair_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">query\nMKV-LA\n>subject\nMRV-LS\n>extra\nAAAAAA\n").unwrap();

        let (first, second) = read_pair(file.path()).unwrap();
        assert_eq!(first, Record::new("query", "MKV-LA"));
        assert_eq!(second, Record::new("subject", "MRV-LS"));
    }

    #[test]
    fn test_read_pair_needs_two_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">only\nMKV\n").unwrap();

        assert!(matches!(read_pair(file.path()), Err(FastaError::NotAPair(1))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_pair(dir.path().join("missing.fasta"));
        assert!(matches!(result, Err(FastaError::IoError(_))));
    }
}
