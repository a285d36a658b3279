use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::app::App;
use crate::theme::Theme;
use crate::ui::centered;

/// Renders editable text with the character under the cursor reversed.
pub fn input_spans(input: &str, cursor: usize, style: Style) -> Vec<Span<'static>> {
  let before: String = input.chars().take(cursor).collect();
  let at = input.chars().nth(cursor).map_or_else(|| " ".to_string(), String::from);
  let after: String = input.chars().skip(cursor + 1).collect();
  vec![
    Span::styled(before, style),
    Span::styled(at, style.add_modifier(Modifier::REVERSED)),
    Span::styled(after, style),
  ]
}

pub fn render_rename(app: &App, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let Some(popup) = centered(area, 50, 3) else {
    return;
  };
  Clear.render(popup, buf);

  let line = Line::from(input_spans(
    &app.prompt_input,
    app.prompt_cursor,
    Style::default().fg(theme.text),
  ));

  let block = Block::default()
    .borders(Borders::ALL)
    .title(" Rename ")
    .border_style(Style::default().fg(theme.accent))
    .style(Style::default().bg(theme.bg_overlay));

  Paragraph::new(line).block(block).render(popup, buf);
}

pub fn render_confirm_delete(app: &App, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let name = app.prompt_target.as_deref().unwrap_or("");
  let Some(popup) = centered(area, 50, 5) else {
    return;
  };
  Clear.render(popup, buf);

  let lines = vec![
    Line::from(vec![
      Span::styled(" Permanently delete ", Style::default().fg(theme.text)),
      Span::styled(
        name.to_string(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
      ),
      Span::styled("?", Style::default().fg(theme.text)),
    ]),
    Line::from(""),
    Line::from(Span::styled(" (y/N)", Style::default().fg(theme.text_muted))),
  ];

  let block = Block::default()
    .borders(Borders::ALL)
    .title(" Delete ")
    .border_style(Style::default().fg(theme.warning))
    .style(Style::default().bg(theme.bg_overlay));

  Paragraph::new(lines).block(block).render(popup, buf);
}

#[cfg(test)]
mod tests {
  use super::*;

  fn text(spans: &[Span]) -> Vec<String> {
    spans.iter().map(|s| s.content.to_string()).collect()
  }

  #[test]
  fn test_input_spans_cursor_in_middle() {
    let spans = input_spans("abc", 1, Style::default());
    assert_eq!(text(&spans), vec!["a", "b", "c"]);
    assert!(spans[1].style.add_modifier.contains(Modifier::REVERSED));
  }

  #[test]
  fn test_input_spans_cursor_at_end() {
    let spans = input_spans("abc", 3, Style::default());
    assert_eq!(text(&spans), vec!["abc", " ", ""]);
  }

  #[test]
  fn test_input_spans_multibyte() {
    let spans = input_spans("héllo", 2, Style::default());
    assert_eq!(text(&spans), vec!["hé", "l", "lo"]);
  }
}
