use std::path::Path;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::corpus::loader::{LoadError, Loader};
use crate::corpus::record::{Corpus, Item, Mode, SourceKey};
use crate::session::nav::{self, Advance};

/// Cursor read on an empty or undersized view. Callers check
/// `progress().1 > 0` first, so hitting this is an invariant violation,
/// not a user-facing condition.
#[derive(Debug, Error)]
#[error("cursor {index} out of bounds for a view of {len} records")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Mutable drill progress through one corpus: cursor position and the
/// optional shuffled view. Lifetime is the interactive process; nothing
/// here is persisted.
pub struct Session {
    key: Option<SourceKey>,
    corpus: Option<Arc<Corpus>>,
    cursor: usize,
    shuffle: bool,
    /// Permutation of record indices, materialized lazily on first enabling
    /// shuffle and discarded on disable or identity change. The cursor is a
    /// raw index into whichever view is active and is never remapped, so
    /// toggling shuffle mid-drill may land on a different logical item.
    order: Option<Vec<usize>>,
    rng: SmallRng,
}

impl Session {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            key: None,
            corpus: None,
            cursor: 0,
            shuffle: false,
            order: None,
            rng,
        }
    }

    /// Load and activate a corpus. On a failed load the previous session
    /// state is left untouched; no drill starts.
    pub fn select(&mut self, loader: &mut Loader, path: &Path, mode: Mode) -> Result<(), LoadError> {
        let corpus = loader.load(path, mode)?;
        self.install(SourceKey::new(path, mode), corpus);
        Ok(())
    }

    pub(crate) fn install(&mut self, key: SourceKey, corpus: Arc<Corpus>) {
        let identity_changed = self.key.as_ref() != Some(&key);
        self.key = Some(key);

        if identity_changed {
            self.cursor = 0;
            self.order = None;
        } else if self.cursor >= corpus.len() {
            // Same identity but the file shrank between selections.
            self.cursor = corpus.len().saturating_sub(1);
        }

        // A stale permutation from a previous parse of this file is useless
        // once the record count changes.
        if self.order.as_ref().is_some_and(|o| o.len() != corpus.len()) {
            self.order = None;
        }

        self.corpus = Some(corpus);

        // The shuffle preference survives identity changes; only the
        // materialized order is discarded, so rebuild it here.
        if self.shuffle && self.order.is_none() {
            self.order = Some(self.permutation());
        }
    }

    pub fn toggle_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
        if !enabled {
            self.order = None;
        } else if self.order.is_none() && self.corpus.is_some() {
            self.order = Some(self.permutation());
        }
    }

    fn permutation(&mut self) -> Vec<usize> {
        let len = self.corpus.as_ref().map(|c| c.len()).unwrap_or(0);
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }

    pub fn current(&self) -> Result<Item<'_>, IndexError> {
        let len = self.total();
        let corpus = self.corpus.as_deref().ok_or(IndexError {
            index: self.cursor,
            len,
        })?;
        if self.cursor >= len {
            return Err(IndexError {
                index: self.cursor,
                len,
            });
        }

        let logical = match (&self.order, self.shuffle) {
            (Some(order), true) => order[self.cursor],
            _ => self.cursor,
        };

        Ok(match corpus {
            Corpus::Dictation(items) => Item::Dictation(&items[logical]),
            Corpus::Translation(pairs) => Item::Translation(&pairs[logical]),
        })
    }

    pub fn advance(&mut self) -> Advance {
        let advance = nav::next(self.cursor, self.total());
        if let Advance::Index(index) = advance {
            self.cursor = index;
        }
        advance
    }

    pub fn retreat(&mut self) {
        self.cursor = nav::prev(self.cursor);
    }

    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// (zero-based cursor, total records in the active view).
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.total())
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    pub fn mode(&self) -> Option<Mode> {
        self.corpus.as_ref().map(|c| c.mode())
    }

    fn total(&self) -> usize {
        self.corpus.as_ref().map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::record::TranslationPair;

    fn pair(prompt: &str, answer: &str) -> TranslationPair {
        TranslationPair {
            prompt: prompt.to_string(),
            answer: answer.to_string(),
        }
    }

    fn corpus(n: usize) -> Arc<Corpus> {
        let pairs = (0..n)
            .map(|i| pair(&format!("问{i}"), &format!("answer {i}")))
            .collect();
        Arc::new(Corpus::Translation(pairs))
    }

    fn key(file: &str, mode: Mode) -> SourceKey {
        SourceKey {
            file: file.to_string(),
            mode,
        }
    }

    fn session() -> Session {
        Session::with_rng(SmallRng::seed_from_u64(7))
    }

    fn answer_at(session: &Session) -> String {
        match session.current().unwrap() {
            Item::Translation(p) => p.answer.clone(),
            Item::Dictation(i) => i.english.clone(),
        }
    }

    #[test]
    fn test_current_on_empty_session_is_index_error() {
        let s = session();
        let err = s.current().unwrap_err();
        assert_eq!(err.len, 0);
        assert_eq!(s.progress(), (0, 0));
    }

    #[test]
    fn test_advance_and_retreat_boundaries() {
        let mut s = session();
        s.install(key("a.docx", Mode::Translation), corpus(3));

        s.retreat();
        assert_eq!(s.progress().0, 0);

        assert_eq!(s.advance(), Advance::Index(1));
        assert_eq!(s.advance(), Advance::Index(2));
        assert_eq!(s.advance(), Advance::Complete);
        // Cursor stays on the last record after completion.
        assert_eq!(s.progress(), (2, 3));
    }

    #[test]
    fn test_identity_change_resets_cursor_and_order() {
        let mut s = session();
        s.install(key("a.docx", Mode::Translation), corpus(5));
        s.advance();
        s.toggle_shuffle(true);
        assert!(s.order.is_some());

        // Same file, different mode: still an identity change.
        s.install(key("a.docx", Mode::Dictation), {
            let items = (0..4)
                .map(|i| crate::corpus::record::DictationItem::plain(&format!("line {i}")))
                .collect();
            Arc::new(Corpus::Dictation(items))
        });
        assert_eq!(s.progress().0, 0);
        // Shuffle preference survives; the order was rebuilt for the new corpus.
        assert!(s.shuffle_enabled());
        let order = s.order.clone().unwrap();
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_reselecting_same_identity_keeps_cursor() {
        let mut s = session();
        s.install(key("a.docx", Mode::Translation), corpus(5));
        s.advance();
        s.advance();
        s.install(key("a.docx", Mode::Translation), corpus(5));
        assert_eq!(s.progress().0, 2);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut s = session();
        s.install(key("a.docx", Mode::Translation), corpus(20));
        s.toggle_shuffle(true);

        let mut order = s.order.clone().unwrap();
        order.sort();
        let expected: Vec<usize> = (0..20).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_repeated_enable_does_not_reshuffle() {
        let mut s = session();
        s.install(key("a.docx", Mode::Translation), corpus(20));
        s.toggle_shuffle(true);
        let first = s.order.clone().unwrap();
        s.toggle_shuffle(true);
        assert_eq!(s.order.as_ref().unwrap(), &first);
    }

    #[test]
    fn test_disable_discards_order_and_view_follows_source_order() {
        let mut s = session();
        s.install(key("a.docx", Mode::Translation), corpus(10));
        s.advance();
        s.toggle_shuffle(true);
        s.toggle_shuffle(false);
        assert!(s.order.is_none());
        // Cursor was not remapped; it reads the canonical view at index 1.
        assert_eq!(answer_at(&s), "answer 1");
    }

    #[test]
    fn test_all_records_reachable_under_shuffle() {
        let mut s = session();
        s.install(key("a.docx", Mode::Translation), corpus(6));
        s.toggle_shuffle(true);

        let mut seen = Vec::new();
        loop {
            seen.push(answer_at(&s));
            if s.advance() == Advance::Complete {
                break;
            }
        }
        seen.sort();
        let mut expected: Vec<String> = (0..6).map(|i| format!("answer {i}")).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_shrunken_reparse_clamps_cursor_and_drops_stale_order() {
        let mut s = session();
        s.install(key("a.docx", Mode::Translation), corpus(5));
        s.toggle_shuffle(true);
        s.advance();
        s.advance();
        s.advance();
        s.advance();

        s.install(key("a.docx", Mode::Translation), corpus(2));
        assert_eq!(s.progress(), (1, 2));
        assert_eq!(s.order.as_ref().unwrap().len(), 2);
        assert!(s.current().is_ok());
    }
}
