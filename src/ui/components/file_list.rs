use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// Corpus file picker for the selected drill mode. Shows a warning when the
/// corpus directory has nothing usable and the load error for a file that
/// failed to parse.
pub struct FileList<'a> {
    pub title: &'a str,
    pub files: &'a [String],
    pub selected: usize,
    pub warning: Option<&'a str>,
    pub error: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for &FileList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} files ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(inner);

        if let Some(warning) = self.warning {
            let p = Paragraph::new(Line::from(Span::styled(
                warning,
                Style::default().fg(colors.warning()),
            )))
            .wrap(Wrap { trim: true });
            p.render(layout[0], buf);
        } else {
            let lines: Vec<Line> = self
                .files
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let is_selected = i == self.selected;
                    let indicator = if is_selected { ">" } else { " " };
                    Line::from(Span::styled(
                        format!(" {indicator} {name}"),
                        Style::default()
                            .fg(if is_selected {
                                colors.accent()
                            } else {
                                colors.fg()
                            })
                            .add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ))
                })
                .collect();
            Paragraph::new(lines).render(layout[0], buf);
        }

        if let Some(error) = self.error {
            let p = Paragraph::new(Line::from(Span::styled(
                error,
                Style::default().fg(colors.error()),
            )))
            .wrap(Wrap { trim: true });
            p.render(layout[1], buf);
        }
    }
}
