use std::path::PathBuf;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::corpus::record::Mode;
use crate::session::score::Verdict;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Where the current item's reference audio ended up. Missing files are an
/// inline note, never a failed drill.
#[derive(Clone, Debug)]
pub enum AudioStatus {
    Resolved(PathBuf),
    Missing(String),
}

/// Per-item feedback after an explicit submit. Dictation only reveals;
/// back-translation carries a verdict plus the reference for the incorrect
/// case.
#[derive(Clone, Debug)]
pub enum CardFeedback {
    Revealed(String),
    Verdict { verdict: Verdict, reference: String },
}

pub struct DrillCard<'a> {
    pub mode: Mode,
    pub prompt: &'a str,
    pub audio: Option<&'a AudioStatus>,
    pub input: &'a LineInput,
    pub feedback: Option<&'a CardFeedback>,
    pub shuffled: bool,
    pub theme: &'a Theme,
}

impl DrillCard<'_> {
    fn title(&self) -> String {
        let shuffle = if self.shuffled { " [shuffled]" } else { "" };
        format!(" {}{} ", self.mode.title(), shuffle)
    }

    fn prompt_lines(&self) -> Vec<Line<'_>> {
        let colors = &self.theme.colors;
        match self.mode {
            Mode::Dictation => {
                let mut lines = vec![Line::from(Span::styled(
                    "Type the English sentence you heard:",
                    Style::default().fg(colors.fg()),
                ))];
                match self.audio {
                    Some(AudioStatus::Resolved(path)) => lines.push(Line::from(Span::styled(
                        format!("audio: {}", path.display()),
                        Style::default().fg(colors.dim()),
                    ))),
                    Some(AudioStatus::Missing(name)) => lines.push(Line::from(Span::styled(
                        format!("audio file not found: {name}"),
                        Style::default().fg(colors.error()),
                    ))),
                    None => {}
                }
                lines
            }
            Mode::Translation => vec![
                Line::from(Span::styled(
                    "Translate into English:",
                    Style::default().fg(colors.fg()),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    self.prompt,
                    Style::default()
                        .fg(colors.prompt())
                        .add_modifier(Modifier::BOLD),
                )),
            ],
        }
    }

    fn input_line(&self) -> Line<'_> {
        let colors = &self.theme.colors;
        let (before, at, after) = self.input.render_parts();

        let mut spans = vec![
            Span::styled("> ", Style::default().fg(colors.accent())),
            Span::styled(before, Style::default().fg(colors.fg())),
        ];
        match at {
            Some(ch) => {
                spans.push(Span::styled(
                    ch.to_string(),
                    Style::default()
                        .fg(colors.input_cursor_fg())
                        .bg(colors.input_cursor_bg()),
                ));
                spans.push(Span::styled(after, Style::default().fg(colors.fg())));
            }
            None => {
                spans.push(Span::styled(
                    " ",
                    Style::default().bg(colors.input_cursor_bg()),
                ));
            }
        }
        Line::from(spans)
    }

    fn feedback_lines(&self) -> Vec<Line<'_>> {
        let colors = &self.theme.colors;
        match self.feedback {
            None => {
                let hint = match self.mode {
                    Mode::Dictation => "Press Enter to reveal the reference text.",
                    Mode::Translation => "Press Enter to check your answer.",
                };
                vec![Line::from(Span::styled(
                    hint,
                    Style::default().fg(colors.dim()),
                ))]
            }
            Some(CardFeedback::Revealed(reference)) => vec![
                Line::from(Span::styled(
                    "Reference:",
                    Style::default().fg(colors.dim()),
                )),
                Line::from(Span::styled(
                    reference.as_str(),
                    Style::default().fg(colors.success()),
                )),
            ],
            Some(CardFeedback::Verdict {
                verdict: Verdict::Correct,
                ..
            }) => vec![Line::from(Span::styled(
                "Correct!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ))],
            Some(CardFeedback::Verdict {
                verdict: Verdict::Incorrect,
                reference,
            }) => vec![
                Line::from(Span::styled(
                    "Not quite. Reference answer:",
                    Style::default().fg(colors.error()),
                )),
                Line::from(Span::styled(
                    reference.as_str(),
                    Style::default().fg(colors.success()),
                )),
            ],
        }
    }
}

impl Widget for &DrillCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title())
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Min(2),
            ])
            .split(inner);

        Paragraph::new(self.prompt_lines())
            .wrap(Wrap { trim: true })
            .render(layout[0], buf);

        Paragraph::new(self.input_line()).render(layout[1], buf);

        Paragraph::new(self.feedback_lines())
            .wrap(Wrap { trim: true })
            .render(layout[2], buf);
    }
}
