use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::app::ContextMenu;
use crate::theme::Theme;

const MENU_WIDTH: u16 = 14;

/// Where the menu box goes: at its anchor, pushed back inside `area` when it
/// would run off the right or bottom edge.
pub fn menu_rect(menu: &ContextMenu, area: Rect) -> Rect {
  let width = MENU_WIDTH.min(area.width);
  let height = (menu.items.len() as u16 + 2).min(area.height);
  let max_x = area.x + area.width - width;
  let max_y = area.y + area.height - height;
  Rect::new(menu.x.clamp(area.x, max_x), menu.y.clamp(area.y, max_y), width, height)
}

pub fn render_context_menu(menu: &ContextMenu, area: Rect, buf: &mut Buffer, theme: &Theme) {
  if area.width < MENU_WIDTH || area.height < 3 {
    return;
  }
  let popup = menu_rect(menu, area);
  Clear.render(popup, buf);

  let lines: Vec<Line> = menu
    .items
    .iter()
    .enumerate()
    .map(|(i, item)| {
      if i == menu.selected {
        Line::from(Span::styled(
          format!(" {} ", item.label()),
          Style::default()
            .fg(theme.fg_selected)
            .bg(theme.bg_selected)
            .add_modifier(Modifier::BOLD),
        ))
      } else {
        Line::from(Span::styled(
          format!(" {} ", item.label()),
          Style::default().fg(theme.text),
        ))
      }
    })
    .collect();

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(theme.border))
    .style(Style::default().bg(theme.bg_overlay));

  Paragraph::new(lines).block(block).render(popup, buf);
}
