pub mod context_menu;
pub mod error;
pub mod help;
pub mod listing;
pub mod prompt;
pub mod status_bar;
pub mod toolbar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::App;
use crate::config::Config;
use crate::event::{InputMode, PromptKind};

pub fn draw(frame: &mut Frame, app: &mut App, config: &Config) {
  let area = frame.area();
  let theme = &config.theme;

  // Vertical layout: toolbar, listing, status bar
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),
      Constraint::Min(3),
      Constraint::Length(1),
    ])
    .split(area);

  toolbar::render_toolbar(app, chunks[0], frame.buffer_mut(), theme);
  listing::render_listing(app, chunks[1], frame.buffer_mut(), theme);
  status_bar::render_status_bar(app, chunks[2], frame.buffer_mut(), theme);

  // Overlays
  match app.input_mode {
    InputMode::Help => help::render_help(config, area, frame.buffer_mut(), theme),
    InputMode::ContextMenu => {
      if let Some(menu) = &app.context_menu {
        context_menu::render_context_menu(menu, area, frame.buffer_mut(), theme);
      }
    }
    InputMode::Prompt if app.prompt_kind == Some(PromptKind::Rename) => {
      prompt::render_rename(app, area, frame.buffer_mut(), theme);
    }
    InputMode::Prompt if app.prompt_kind == Some(PromptKind::ConfirmDelete) => {
      prompt::render_confirm_delete(app, area, frame.buffer_mut(), theme);
    }
    _ => {}
  }
  if !app.error_messages.is_empty() {
    error::render_error(&app.error_messages, area, frame.buffer_mut(), theme);
  }
}

/// A `width` x `height` rectangle centered in `area`, or `None` when it
/// doesn't fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Option<Rect> {
  let width = width.min(area.width.saturating_sub(4));
  let height = height.min(area.height.saturating_sub(2));
  if width < 10 || height < 3 {
    return None;
  }
  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;
  Some(Rect::new(x, y, width, height))
}
