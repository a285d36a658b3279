use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{
  Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
  StatefulWidget, Table, Widget,
};

use crate::app::App;
use crate::theme::Theme;

const WIDTHS: [Constraint; 4] = [
  Constraint::Min(16),
  Constraint::Length(14),
  Constraint::Length(10),
  Constraint::Length(19),
];

pub fn render_listing(app: &mut App, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let dir_name = app
    .current_dir()
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| app.current_dir().to_string_lossy().to_string());

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(theme.border))
    .title(format!(" {dir_name} "))
    .title_style(Style::default().fg(theme.accent));
  let inner = block.inner(area);
  block.render(area, buf);

  // The header takes the first inner row
  let rows_area = Rect {
    y: inner.y + 1.min(inner.height),
    height: inner.height.saturating_sub(1),
    ..inner
  };
  app.set_listing_rows(rows_area);

  let header = Row::new(["Name", "Size", "Type", "Modified"])
    .style(Style::default().fg(theme.text_muted).add_modifier(Modifier::BOLD));

  if app.entries.is_empty() {
    let table = Table::new(Vec::<Row>::new(), WIDTHS).header(header).column_spacing(1);
    Widget::render(table, inner, buf);
    Paragraph::new(Line::styled(" (empty)", Style::default().fg(theme.text_dim)))
      .render(rows_area, buf);
    return;
  }

  let visible = rows_area.height as usize;
  let start = app.scroll_offset.min(app.entries.len());
  let end = (start + visible).min(app.entries.len());

  let rows: Vec<Row> = app.entries[start..end]
    .iter()
    .enumerate()
    .map(|(i, entry)| {
      let is_selected = start + i == app.cursor;
      // The selected row's own style has to win over per-column colors
      let (mut name_style, detail) = if is_selected {
        (Style::default(), Style::default())
      } else if entry.is_symlink {
        (Style::default().fg(theme.symlink), Style::default().fg(theme.text_dim))
      } else if entry.is_dir() {
        (
          Style::default().fg(theme.directory).add_modifier(Modifier::BOLD),
          Style::default().fg(theme.text_dim),
        )
      } else {
        (Style::default().fg(theme.file), Style::default().fg(theme.text_dim))
      };
      if entry.is_symlink {
        name_style = name_style.add_modifier(Modifier::ITALIC);
      }
      if app.is_cut(entry) {
        name_style = name_style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
      }

      let row = Row::new([
        Cell::from(entry.name.clone()).style(name_style),
        Cell::from(Line::from(entry.size_label()).alignment(Alignment::Right)).style(detail),
        Cell::from(entry.type_label()).style(detail),
        Cell::from(entry.modified_label()).style(detail),
      ]);
      if is_selected {
        row.style(
          Style::default()
            .fg(theme.fg_selected)
            .bg(theme.bg_selected)
            .add_modifier(Modifier::BOLD),
        )
      } else {
        row
      }
    })
    .collect();

  let table = Table::new(rows, WIDTHS).header(header).column_spacing(1);
  Widget::render(table, inner, buf);

  if app.entries.len() > visible {
    let mut state = ScrollbarState::new(app.entries.len()).position(app.cursor);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
      .begin_symbol(None)
      .end_symbol(None)
      .style(Style::default().fg(theme.border));
    scrollbar.render(area.inner(Margin { vertical: 1, horizontal: 0 }), buf, &mut state);
  }
}
