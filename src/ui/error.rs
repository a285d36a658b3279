use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::theme::Theme;
use crate::ui::centered;

pub fn render_error(messages: &[String], area: Rect, buf: &mut Buffer, theme: &Theme) {
  let width = 60.min(area.width.saturating_sub(4));
  let inner_width = width.saturating_sub(2) as usize;

  // Estimate line count with word-wrapping
  let mut line_count: u16 = 0;
  for msg in messages {
    line_count += ((msg.chars().count() / inner_width.max(1)) as u16) + 1;
  }
  // Borders, blank line and hint
  let Some(popup) = centered(area, width, line_count + 4) else {
    return;
  };

  Clear.render(popup, buf);

  let mut lines: Vec<Line> = messages
    .iter()
    .map(|msg| Line::from(Span::styled(format!(" {msg}"), Style::default().fg(theme.text))))
    .collect();

  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    " [Esc] dismiss",
    Style::default().fg(theme.text_muted),
  )));

  let block = Block::default()
    .borders(Borders::ALL)
    .title(" Error ")
    .border_style(Style::default().fg(theme.error))
    .style(Style::default().bg(theme.bg_overlay));

  let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
  paragraph.render(popup, buf);
}
