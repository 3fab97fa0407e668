use std::path::PathBuf;

use crate::config::Config;
use crate::corpus::library::{self, Library};
use crate::corpus::loader::Loader;
use crate::corpus::record::{Item, Mode};
use crate::session::nav::Advance;
use crate::session::score;
use crate::session::state::Session;
use crate::ui::components::drill_card::{AudioStatus, CardFeedback};
use crate::ui::components::menu::Menu;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    FileSelect,
    Drill,
    Complete,
}

/// All interactive state. Every user interaction is one synchronous handler
/// call that fully updates this struct before the next render; rendering
/// itself never mutates anything.
pub struct App {
    pub screen: AppScreen,
    pub mode: Mode,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub library: Library,
    pub file_selected: usize,
    pub active_file: Option<String>,
    pub load_error: Option<String>,
    pub loader: Loader,
    pub session: Session,
    pub input: LineInput,
    pub feedback: Option<CardFeedback>,
    pub audio: Option<AudioStatus>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);
        let library = Library::scan(&PathBuf::from(&config.dictation_dir));

        Self {
            screen: AppScreen::Menu,
            mode: Mode::Dictation,
            menu,
            theme,
            config,
            library,
            file_selected: 0,
            active_file: None,
            load_error: None,
            loader: Loader::new(),
            session: Session::new(),
            input: LineInput::new(),
            feedback: None,
            audio: None,
            should_quit: false,
        }
    }

    fn corpus_dir(&self, mode: Mode) -> PathBuf {
        match mode {
            Mode::Dictation => PathBuf::from(&self.config.dictation_dir),
            Mode::Translation => PathBuf::from(&self.config.translation_dir),
        }
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.library = Library::scan(&self.corpus_dir(mode));
        self.file_selected = 0;
        self.load_error = None;
        self.screen = AppScreen::FileSelect;
    }

    pub fn file_next(&mut self) {
        if !self.library.is_empty() {
            self.file_selected = (self.file_selected + 1).min(self.library.files.len() - 1);
        }
    }

    pub fn file_prev(&mut self) {
        self.file_selected = self.file_selected.saturating_sub(1);
    }

    /// Parse the highlighted file and start (or resume) its drill. A load
    /// failure stays on this screen with the cause shown; the previous
    /// session, if any, is untouched.
    pub fn open_selected(&mut self) {
        let Some(path) = self.library.files.get(self.file_selected).cloned() else {
            return;
        };

        match self.session.select(&mut self.loader, &path, self.mode) {
            Ok(()) => {
                self.active_file = self.library.file_name(self.file_selected);
                self.load_error = None;
                self.refresh_item_context();
                self.screen = AppScreen::Drill;
            }
            Err(err) => {
                self.load_error = Some(err.to_string());
            }
        }
    }

    /// Reset per-item state after the cursor moved or the view changed.
    fn refresh_item_context(&mut self) {
        self.input.clear();
        self.feedback = None;

        let audio_name = match self.session.current() {
            Ok(Item::Dictation(item)) => item.audio.clone(),
            _ => None,
        };
        self.audio = audio_name.map(|name| {
            let audio_dir = PathBuf::from(&self.config.audio_dir);
            match library::resolve_audio(&audio_dir, &name) {
                Ok(path) => AudioStatus::Resolved(path),
                Err(err) => AudioStatus::Missing(err.name),
            }
        });
    }

    /// Enter on the drill card. Dictation toggles the reveal; back-translation
    /// checks the answer. No record of past answers is kept.
    pub fn submit(&mut self) {
        let feedback = match self.session.current() {
            Ok(Item::Dictation(item)) => match self.feedback {
                Some(CardFeedback::Revealed(_)) => None,
                _ => Some(CardFeedback::Revealed(item.english.clone())),
            },
            Ok(Item::Translation(pair)) => Some(CardFeedback::Verdict {
                verdict: score::check(self.input.value(), &pair.answer),
                reference: pair.answer.clone(),
            }),
            // Drill screen is only reachable with a non-empty corpus.
            Err(_) => None,
        };
        self.feedback = feedback;
    }

    pub fn next_item(&mut self) {
        match self.session.advance() {
            Advance::Index(_) => self.refresh_item_context(),
            Advance::Complete => self.screen = AppScreen::Complete,
        }
    }

    pub fn prev_item(&mut self) {
        // No-op at the first record, so typed input survives.
        if self.session.progress().0 > 0 {
            self.session.retreat();
            self.refresh_item_context();
        }
    }

    /// Shuffle is offered for back-translation drills only, matching the
    /// original tool's surface.
    pub fn toggle_shuffle(&mut self) {
        if self.mode != Mode::Translation {
            return;
        }
        let enabled = !self.session.shuffle_enabled();
        self.session.toggle_shuffle(enabled);
        self.refresh_item_context();
    }

    pub fn restart_drill(&mut self) {
        self.session.restart();
        self.refresh_item_context();
        self.screen = AppScreen::Drill;
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_file_select(&mut self) {
        self.load_error = None;
        self.screen = AppScreen::FileSelect;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
