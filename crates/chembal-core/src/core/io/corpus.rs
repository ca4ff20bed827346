use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// One line of a regression corpus: an equation and whether it is expected to balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub equation: String,
    pub balanceable: bool,
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },

    #[error("Corpus parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: expected 'equation;True|False', found {fields} field(s)")]
    MalformedLine { line: u64, fields: usize },

    #[error("Line {line}: invalid balanceable flag '{flag}', expected True or False")]
    InvalidFlag { line: u64, flag: String },
}

/// Reads a corpus of `equation;True|False` lines.
///
/// There is no header row. Blank lines and lines starting with `#` are
/// skipped. The flag is matched case-insensitively after trimming.
pub fn read_corpus_from<R: Read>(reader: R) -> Result<Vec<CorpusEntry>, CorpusError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        if record.len() != 2 {
            return Err(CorpusError::MalformedLine {
                line,
                fields: record.len(),
            });
        }

        let flag = record[1].trim();
        let balanceable = if flag.eq_ignore_ascii_case("true") {
            true
        } else if flag.eq_ignore_ascii_case("false") {
            false
        } else {
            return Err(CorpusError::InvalidFlag {
                line,
                flag: flag.to_string(),
            });
        };

        entries.push(CorpusEntry {
            equation: record[0].to_string(),
            balanceable,
        });
    }

    Ok(entries)
}

/// Reads a corpus file from disk. See [`read_corpus_from`].
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<CorpusEntry>, CorpusError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CorpusError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_corpus_from(BufReader::new(file))
}
