use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use thiserror::Error;

use crate::corpus::docx;
use crate::corpus::record::{Corpus, DictationItem, Mode, TranslationPair};
use crate::corpus::sheet::{self, SheetRow};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not a supported corpus format (expected .docx or .xlsx)")]
    UnsupportedFormat { path: PathBuf },
    #[error("cannot parse {path}: {detail}")]
    Malformed { path: PathBuf, detail: String },
    #[error("no usable records in {path}: {detail}")]
    NoRecords { path: PathBuf, detail: String },
}

/// True if the text contains at least one CJK ideograph (U+4E00..=U+9FA5),
/// the range the source corpora use to mark Chinese lines.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|ch| ('\u{4e00}'..='\u{9fa5}').contains(&ch))
}

/// Pair adjacent (Chinese, English) lines into back-translation exercises.
///
/// Greedy single-pass adjacency scan: every line i with CJK content whose
/// successor has none forms a pair. A Chinese line directly followed by
/// another Chinese line is silently dropped; this matches the source
/// corpora's expectations and is deliberate, not a bug.
fn pair_lines(lines: &[String]) -> Vec<TranslationPair> {
    let mut pairs = Vec::new();
    for window in lines.windows(2) {
        if contains_cjk(&window[0]) && !contains_cjk(&window[1]) {
            pairs.push(TranslationPair {
                prompt: window[0].clone(),
                answer: window[1].clone(),
            });
        }
    }
    pairs
}

fn dictation_lines(lines: &[String]) -> Vec<DictationItem> {
    lines
        .iter()
        .filter(|line| !contains_cjk(line))
        .map(|line| DictationItem::plain(line))
        .collect()
}

fn corpus_from_rows(rows: Vec<SheetRow>, mode: Mode) -> Corpus {
    match mode {
        Mode::Dictation => Corpus::Dictation(
            rows.into_iter()
                .filter(|row| !row.answer.is_empty())
                .map(|row| DictationItem {
                    english: row.answer,
                    chinese: Some(row.prompt).filter(|p| !p.is_empty()),
                    audio: row.audio,
                })
                .collect(),
        ),
        Mode::Translation => Corpus::Translation(
            rows.into_iter()
                .filter(|row| !row.prompt.is_empty() && !row.answer.is_empty())
                .map(|row| TranslationPair {
                    prompt: row.prompt,
                    answer: row.answer,
                })
                .collect(),
        ),
    }
}

fn no_records_detail(mode: Mode) -> &'static str {
    match mode {
        Mode::Dictation => "dictation needs English lines (no Chinese characters)",
        Mode::Translation => "back-translation needs a Chinese line followed by an English line",
    }
}

/// File identity for the memo cache. Length + mtime is enough to notice the
/// user editing a corpus between selections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Signature {
    len: u64,
    modified: Option<SystemTime>,
}

impl Signature {
    fn of(path: &Path) -> Result<Self, LoadError> {
        let meta = fs::metadata(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

/// Parses source files into corpora, memoized by path + mode + file
/// signature so reselecting the same unchanged file never re-parses.
#[derive(Default)]
pub struct Loader {
    cache: HashMap<(PathBuf, Mode), (Signature, Arc<Corpus>)>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path, mode: Mode) -> Result<Arc<Corpus>, LoadError> {
        let signature = Signature::of(path)?;
        let key = (path.to_path_buf(), mode);

        if let Some((cached_sig, corpus)) = self.cache.get(&key) {
            if *cached_sig == signature {
                return Ok(Arc::clone(corpus));
            }
        }

        let corpus = parse(path, mode)?;
        if corpus.is_empty() {
            return Err(LoadError::NoRecords {
                path: path.to_path_buf(),
                detail: no_records_detail(mode).to_string(),
            });
        }

        let corpus = Arc::new(corpus);
        self.cache.insert(key, (signature, Arc::clone(&corpus)));
        Ok(corpus)
    }
}

fn parse(path: &Path, mode: Mode) -> Result<Corpus, LoadError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "docx" => {
            let lines = docx::paragraph_texts(path)?;
            Ok(match mode {
                Mode::Dictation => Corpus::Dictation(dictation_lines(&lines)),
                Mode::Translation => Corpus::Translation(pair_lines(&lines)),
            })
        }
        "xlsx" => Ok(corpus_from_rows(sheet::rows(path)?, mode)),
        _ => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
