mod app;
mod config;
mod corpus;
mod session;
mod ui;

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen};
use corpus::record::Mode;
use ui::components::drill_card::DrillCard;
use ui::components::file_list::FileList;
use ui::components::progress_bar::ProgressBar;
use ui::layout::AppLayout;
use ui::line_input::InputResult;

#[derive(Parser)]
#[command(name = "lingdr", version, about = "Terminal dictation and back-translation drills")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Directory with dictation corpora (.docx/.xlsx)")]
    dictation_dir: Option<String>,

    #[arg(long, help = "Directory with back-translation corpora (.docx/.xlsx)")]
    translation_dir: Option<String>,

    #[arg(long, help = "Directory with reference audio files")]
    audio_dir: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new();

    if let Some(dir) = cli.dictation_dir {
        app.config.dictation_dir = dir;
    }
    if let Some(dir) = cli.translation_dir {
        app.config.translation_dir = dir;
    }
    if let Some(dir) = cli.audio_dir {
        app.config.audio_dir = dir;
    }
    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
            app.menu.theme = theme;
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            _ => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::FileSelect => handle_file_select_key(app, key),
        AppScreen::Drill => handle_drill_key(app, key),
        AppScreen::Complete => handle_complete_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.select_mode(Mode::Dictation),
        KeyCode::Char('2') => app.select_mode(Mode::Translation),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.select_mode(Mode::Dictation),
            1 => app.select_mode(Mode::Translation),
            2 => app.should_quit = true,
            _ => {}
        },
        _ => {}
    }
}

fn handle_file_select_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.file_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.file_next(),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
}

fn handle_drill_key(app: &mut App, key: KeyEvent) {
    // Navigation and shuffle use Control so plain characters stay free for
    // the answer text.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('n') => return app.next_item(),
            KeyCode::Char('p') => return app.prev_item(),
            KeyCode::Char('r') => return app.toggle_shuffle(),
            // Other control chords (ctrl-a/e/u/w) are line-editing keys.
            _ => {}
        }
    }
    match key.code {
        KeyCode::PageDown => app.next_item(),
        KeyCode::PageUp => app.prev_item(),
        _ => match app.input.handle(key) {
            InputResult::Submit => app.submit(),
            InputResult::Cancel => app.go_to_file_select(),
            InputResult::Continue => {}
        },
    }
}

fn handle_complete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.restart_drill(),
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_file_select(),
        KeyCode::Char('m') => app.go_to_menu(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::FileSelect => render_file_select(frame, app),
        AppScreen::Drill => render_drill(frame, app),
        AppScreen::Complete => render_complete(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " lingdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(info, Style::default().fg(colors.dim()).bg(colors.header_bg())),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &str) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(footer, area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header, "");
    let menu_area = ui::layout::centered_rect(50, 80, layout.main);
    frame.render_widget(&app.menu, menu_area);
    render_footer(frame, app, layout.footer, " [1-2] Start  [q] Quit ");
}

fn render_file_select(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header, app.mode.title());

    let names: Vec<String> = (0..app.library.files.len())
        .filter_map(|i| app.library.file_name(i))
        .collect();
    let empty_hint = app.library.empty_hint();
    let list = FileList {
        title: app.mode.title(),
        files: &names,
        selected: app.file_selected,
        warning: app.library.is_empty().then_some(empty_hint.as_str()),
        error: app.load_error.as_deref(),
        theme: app.theme,
    };
    let list_area = ui::layout::centered_rect(60, 80, layout.main);
    frame.render_widget(&list, list_area);

    render_footer(
        frame,
        app,
        layout.footer,
        " [j/k] Select  [Enter] Open  [Esc] Back ",
    );
}

fn render_drill(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    let (cursor, total) = app.session.progress();
    if total == 0 {
        return;
    }
    let Ok(item) = app.session.current() else {
        return;
    };

    let file = app.active_file.as_deref().unwrap_or("");
    render_header(frame, app, layout.header, &format!("{} | {file}", app.mode.title()));

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(layout.main);

    let prompt = match item {
        corpus::record::Item::Translation(pair) => pair.prompt.as_str(),
        corpus::record::Item::Dictation(_) => "",
    };
    let card = DrillCard {
        mode: app.mode,
        prompt,
        audio: app.audio.as_ref(),
        input: &app.input,
        feedback: app.feedback.as_ref(),
        shuffled: app.session.shuffle_enabled(),
        theme: app.theme,
    };
    frame.render_widget(&card, main_layout[0]);

    let progress = ProgressBar::new(cursor + 1, total, app.theme);
    frame.render_widget(progress, main_layout[1]);

    let hints = match app.mode {
        Mode::Dictation => " [Enter] Reveal  [Ctrl+N/P] Next/Prev  [Esc] Files ",
        Mode::Translation => " [Enter] Check  [Ctrl+N/P] Next/Prev  [Ctrl+R] Shuffle  [Esc] Files ",
    };
    render_footer(frame, app, layout.footer, hints);
}

fn render_complete(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(50, 50, area);

    let block = Block::bordered()
        .title(" Drill complete ")
        .border_style(Style::default().fg(colors.success()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let (_, total) = app.session.progress();
    let file = app.active_file.as_deref().unwrap_or("");
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Well done!",
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("You worked through all {total} items in {file}."),
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[r] Start over   [Esc] Choose another file   [m] Menu",
            Style::default().fg(colors.dim()),
        )),
    ];
    Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .render(inner, frame.buffer_mut());
}
