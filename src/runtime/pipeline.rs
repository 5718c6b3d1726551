//! File-level driver: discovery, per-file extraction, and output.
//!
//! Files are processed one at a time in lexical path order and their records
//! appended in that order, so the output is reproducible for a given input
//! directory.

use crate::entity::OutputRecord;
use crate::lexicon::{LexicalEntry, LexiconDocument, OneOrMany};
use crate::runtime::config_loader::ExtractConfig;
use crate::serialization::{write_to_path, SerializationError};
use crate::transform::{EntryOutcome, EntryTransformer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Errors that stop a run. Each names the file or directory involved.
#[derive(Debug)]
pub enum PipelineError {
    InputDirMissing(PathBuf),
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
    Discovery(glob::GlobError),
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// `LexicalEntry` is neither a list nor a single entry.
    MalformedLexicon {
        path: PathBuf,
        shape: &'static str,
    },
    Output {
        path: PathBuf,
        source: SerializationError,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InputDirMissing(dir) => {
                write!(f, "Input directory not found: {}", dir.display())
            }
            PipelineError::InvalidPattern { pattern, source } => {
                write!(f, "Invalid file pattern '{}': {}", pattern, source)
            }
            PipelineError::Discovery(e) => write!(f, "Failed to list input files: {}", e),
            PipelineError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            PipelineError::Parse { path, source } => {
                write!(f, "Malformed JSON in {}: {}", path.display(), source)
            }
            PipelineError::MalformedLexicon { path, shape } => write!(
                f,
                "Unexpected LexicalEntry shape '{}' in {}",
                shape,
                path.display()
            ),
            PipelineError::Output { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// Outcome of processing one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileReport {
    pub records: Vec<OutputRecord>,
    pub skipped: usize,
    /// True when a malformed entry stopped the file early.
    pub abandoned: bool,
}

impl FileReport {
    pub fn emitted(&self) -> usize {
        self.records.len()
    }
}

/// Counters for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub entries_emitted: usize,
    pub entries_skipped: usize,
    pub files_abandoned: usize,
}

impl RunSummary {
    fn add(&mut self, report: &FileReport) {
        self.files += 1;
        self.entries_emitted += report.emitted();
        self.entries_skipped += report.skipped;
        if report.abandoned {
            self.files_abandoned += 1;
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} records, {} entries skipped, {} files abandoned",
            self.files, self.entries_emitted, self.entries_skipped, self.files_abandoned
        )
    }
}

/// Corpus files under `input_dir` matching `pattern`, sorted by path.
pub fn discover_files(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, PipelineError> {
    if !input_dir.is_dir() {
        return Err(PipelineError::InputDirMissing(input_dir.to_path_buf()));
    }

    let escaped_dir = glob::Pattern::escape(&input_dir.to_string_lossy());
    let full_pattern = Path::new(&escaped_dir).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let paths = glob::glob(&full_pattern).map_err(|source| PipelineError::InvalidPattern {
        pattern: full_pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for path in paths {
        let path = path.map_err(PipelineError::Discovery)?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run every entry through `transformer`, stopping at the first entry whose
/// senses cannot be read.
pub fn process_entries(entries: &[LexicalEntry], transformer: &EntryTransformer) -> FileReport {
    let mut report = FileReport::default();

    for entry in entries {
        match transformer.transform(entry) {
            EntryOutcome::Emitted(record) => report.records.push(record),
            EntryOutcome::Skipped => report.skipped += 1,
            EntryOutcome::FatalForFile(_) => {
                report.abandoned = true;
                break;
            }
        }
    }
    report
}

/// Parse one corpus file and transform its entries.
pub fn process_file(path: &Path, transformer: &EntryTransformer) -> Result<FileReport, PipelineError> {
    let contents = fs::read_to_string(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: LexiconDocument = serde_json::from_str(contents.trim_start_matches('\u{feff}'))
        .map_err(|source| PipelineError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let entries = match document.entries() {
        OneOrMany::Malformed(_) => {
            return Err(PipelineError::MalformedLexicon {
                path: path.to_path_buf(),
                shape: document.entries().shape(),
            })
        }
        entries => entries.as_slice(),
    };

    let report = process_entries(entries, transformer);
    if report.abandoned {
        warn!(
            file = %path.display(),
            processed = report.emitted() + report.skipped,
            total = entries.len(),
            "stopped early on a malformed entry"
        );
    }
    info!(
        file = %path.display(),
        emitted = report.emitted(),
        skipped = report.skipped,
        "processed file"
    );
    Ok(report)
}

/// Extract records from every discovered file, in discovery order.
pub fn extract_records(
    config: &ExtractConfig,
) -> Result<(Vec<OutputRecord>, RunSummary), PipelineError> {
    let files = discover_files(&config.input_dir, &config.file_pattern)?;
    info!(
        input_dir = %config.input_dir.display(),
        files = files.len(),
        "discovered corpus files"
    );

    let transformer = EntryTransformer::new(config);
    let mut records = Vec::new();
    let mut summary = RunSummary::default();

    for path in &files {
        debug!(file = %path.display(), "processing");
        let report = process_file(path, &transformer)?;
        summary.add(&report);
        records.extend(report.records);
    }

    Ok((records, summary))
}

/// Extract every record and write the output artifact.
pub fn run(config: &ExtractConfig) -> Result<RunSummary, PipelineError> {
    let (records, summary) = extract_records(config)?;

    info!(
        output = %config.output_path.display(),
        records = records.len(),
        "writing results"
    );
    write_to_path(&config.output_path, config.format, &records).map_err(|source| {
        PipelineError::Output {
            path: config.output_path.clone(),
            source,
        }
    })?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(value: serde_json::Value) -> Vec<LexicalEntry> {
        serde_json::from_value(value).unwrap()
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_process_entries_counts_outcomes() {
        let entries = entries(json!([
            {"Lemma": {"feat": {"att": "writtenForm", "val": "가"}},
             "Sense": [{"feat": {"att": "definition", "val": "하나"}}]},
            {"Lemma": {"feat": {"att": "writtenForm", "val": "나"}},
             "Sense": {"feat": {"att": "definition", "val": "둘"}}},
            {"Lemma": {"feat": {"att": "writtenForm", "val": "다"}},
             "Sense": [{"feat": {"att": "definition", "val": "셋"}}]}
        ]));

        let report = process_entries(&entries, &EntryTransformer::default());

        assert_eq!(report.emitted(), 2);
        assert_eq!(report.skipped, 1);
        assert!(!report.abandoned);
        assert_eq!(report.records[1].form.as_deref(), Some("다"));
    }

    #[test]
    fn test_process_entries_abandons_after_bad_sense() {
        let entries = entries(json!([
            {"Lemma": {"feat": {"att": "writtenForm", "val": "가"}},
             "Sense": [{"feat": {"att": "definition", "val": "하나"}}]},
            {"Lemma": {"feat": {"att": "writtenForm", "val": "나"}}, "Sense": 7},
            {"Lemma": {"feat": {"att": "writtenForm", "val": "다"}},
             "Sense": [{"feat": {"att": "definition", "val": "셋"}}]}
        ]));

        let report = process_entries(&entries, &EntryTransformer::default());

        assert_eq!(report.emitted(), 1);
        assert!(report.abandoned);
    }

    #[test]
    fn test_discover_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", "{}");
        write(dir.path(), "a.json", "{}");
        write(dir.path(), "notes.txt", "");
        fs::create_dir(dir.path().join("c.json")).unwrap();

        let files = discover_files(dir.path(), "*.json").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let err = discover_files(Path::new("no/such/dir"), "*.json").unwrap_err();
        assert!(matches!(err, PipelineError::InputDirMissing(_)));
    }

    #[test]
    fn test_process_file_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "broken.json", "{\"LexicalResource\": ");

        let err = process_file(&path, &EntryTransformer::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_process_file_single_entry_lexicon_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let body = json!({"LexicalResource": {"Lexicon": {"LexicalEntry": {
            "Lemma": {"feat": {"att": "writtenForm", "val": "설"}},
            "Sense": [{"feat": {"att": "definition", "val": "소문"}}]
        }}}});
        let path = write(dir.path(), "one.json", &format!("\u{feff}{}", body));

        let report = process_file(&path, &EntryTransformer::default()).unwrap();
        assert_eq!(report.emitted(), 1);
    }

    #[test]
    fn test_process_file_malformed_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "odd.json",
            r#"{"LexicalResource": {"Lexicon": {"LexicalEntry": "none"}}}"#,
        );

        let err = process_file(&path, &EntryTransformer::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedLexicon { shape: "string", .. }
        ));
    }
}
