use std::path::Path;

/// Which drill a corpus was loaded for. Determines the record variant
/// produced by the loader; a corpus never mixes variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Dictation,
    Translation,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Dictation => "dictation",
            Mode::Translation => "translation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Dictation => "Dictation",
            Mode::Translation => "Back-translation",
        }
    }
}

/// One dictation stimulus. `chinese` and `audio` are only present for
/// spreadsheet-sourced corpora with the extra columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictationItem {
    pub english: String,
    pub chinese: Option<String>,
    pub audio: Option<String>,
}

impl DictationItem {
    pub fn plain(text: &str) -> Self {
        Self {
            english: text.to_string(),
            chinese: None,
            audio: None,
        }
    }
}

/// One back-translation exercise: Chinese prompt, English reference answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationPair {
    pub prompt: String,
    pub answer: String,
}

/// An ordered, non-empty list of records from one source file. The variant
/// is chosen once at load time from the requested mode, never inferred
/// per-row later.
#[derive(Clone, Debug)]
pub enum Corpus {
    Dictation(Vec<DictationItem>),
    Translation(Vec<TranslationPair>),
}

impl Corpus {
    pub fn len(&self) -> usize {
        match self {
            Corpus::Dictation(items) => items.len(),
            Corpus::Translation(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> Mode {
        match self {
            Corpus::Dictation(_) => Mode::Dictation,
            Corpus::Translation(_) => Mode::Translation,
        }
    }
}

/// A borrowed view of one record, matching the corpus variant.
#[derive(Clone, Copy, Debug)]
pub enum Item<'a> {
    Dictation(&'a DictationItem),
    Translation(&'a TranslationPair),
}

/// Session identity: source file name plus mode. Selecting a different key
/// resets the cursor and discards any shuffled order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub file: String,
    pub mode: Mode,
}

impl SourceKey {
    pub fn new(path: &Path, mode: Mode) -> Self {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { file, mode }
    }
}
