use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::action::Action;
use crate::config::Config;
use crate::theme::Theme;
use crate::ui::centered;

fn section_line(title: &str, section_style: Style) -> Line<'static> {
  Line::from(Span::styled(
    format!(" {title}"),
    section_style.add_modifier(Modifier::DIM),
  ))
}

fn entry_line(
  lookup: &HashMap<Action, Vec<String>>,
  action: Action,
  desc: &str,
  key_style: Style,
  desc_style: Style,
) -> Line<'static> {
  let keys = lookup
    .get(&action)
    .map(|v| v.join(" / "))
    .unwrap_or_else(|| "-".to_string());
  Line::from(vec![
    Span::styled(format!("  {keys:<20}"), key_style.add_modifier(Modifier::BOLD)),
    Span::styled(desc.to_string(), desc_style),
  ])
}

pub fn render_help(config: &Config, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let Some(popup) = centered(area, 52, 30) else {
    return;
  };

  Clear.render(popup, buf);

  let lookup = config.reverse_lookup();

  let key_style = Style::default().fg(theme.accent);
  let desc_style = Style::default().fg(theme.text);
  let section_style = Style::default().fg(theme.text_muted);
  let entry = |action: Action, desc: &str| entry_line(&lookup, action, desc, key_style, desc_style);

  let lines: Vec<Line> = vec![
    section_line("Navigation", section_style),
    entry(Action::MoveDown, "Move down"),
    entry(Action::MoveUp, "Move up"),
    entry(Action::GoToTop, "Go to top"),
    entry(Action::GoToBottom, "Go to bottom"),
    entry(Action::Open, "Open file / enter dir"),
    entry(Action::GoUp, "Parent directory"),
    entry(Action::HistoryBack, "Back"),
    entry(Action::HistoryForward, "Forward"),
    entry(Action::GoHome, "Home directory"),
    entry(Action::PathEditStart, "Type a path"),
    entry(Action::Refresh, "Refresh"),
    section_line("File Operations", section_style),
    entry(Action::CopyFile, "Copy"),
    entry(Action::CutFile, "Cut"),
    entry(Action::Paste, "Paste"),
    entry(Action::DeleteFile, "Delete"),
    entry(Action::RenameStart, "Rename"),
    entry(Action::ContextMenuOpen, "Context menu"),
    section_line("Other", section_style),
    entry(Action::ToggleHelp, "Toggle help"),
    entry(Action::Quit, "Quit"),
    Line::from(""),
    Line::from(Span::styled(
      " Press q, ? or Esc to close".to_string(),
      Style::default().fg(theme.text_muted),
    )),
  ];

  let block = Block::default()
    .borders(Borders::ALL)
    .title(" Help ")
    .border_style(Style::default().fg(theme.border))
    .style(Style::default().bg(theme.bg_overlay));

  let paragraph = Paragraph::new(lines).block(block);
  paragraph.render(popup, buf);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ui::test_util::buffer_text;

  #[test]
  fn test_help_lists_bound_keys() {
    let area = Rect::new(0, 0, 80, 40);
    let mut buf = Buffer::empty(area);
    render_help(&Config::default(), area, &mut buf, &Theme::default());
    let text = buffer_text(&buf);
    assert!(text.contains("Help"));
    assert!(text.contains("Paste"));
    assert!(text.contains("Back"));
  }

  #[test]
  fn test_entry_line_unbound_action() {
    let lookup = HashMap::new();
    let line = entry_line(&lookup, Action::Quit, "Quit", Style::default(), Style::default());
    assert_eq!(line.spans.len(), 2);
    assert!(line.spans[0].content.trim() == "-");
  }
}
