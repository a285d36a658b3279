use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
  self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
  MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::action::Action;
use crate::config::{Config, normalize_key_event};

pub enum Event {
  Key(KeyEvent),
  Mouse(MouseEvent),
  Resize(u16, u16),
  Tick,
}

pub struct EventLoop {
  rx: mpsc::Receiver<Event>,
}

impl EventLoop {
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
      if event::poll(tick_rate).unwrap_or(false) {
        let forwarded = match event::read() {
          Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
          Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
          Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
          _ => None,
        };
        if let Some(ev) = forwarded
          && tx.send(ev).is_err()
        {
          break;
        }
      } else if tx.send(Event::Tick).is_err() {
        break;
      }
    });

    Self { rx }
  }

  pub fn next(&self) -> Result<Event> {
    Ok(self.rx.recv()?)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
  Normal,
  Prompt,
  ContextMenu,
  Help,
  Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
  GoToPath,
  Rename,
  ConfirmDelete,
}

pub fn map_key(key: KeyEvent, mode: InputMode, config: &Config) -> Action {
  match mode {
    InputMode::Error => match key.code {
      KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::ErrorClose,
      _ => Action::None,
    },
    InputMode::Help => match key.code {
      KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::ToggleHelp,
      _ => Action::None,
    },
    InputMode::ContextMenu => match key.code {
      KeyCode::Esc | KeyCode::Char('q') => Action::MenuClose,
      KeyCode::Enter => Action::MenuSelect,
      KeyCode::Up | KeyCode::Char('k') => Action::MenuUp,
      KeyCode::Down | KeyCode::Char('j') => Action::MenuDown,
      _ => Action::None,
    },
    InputMode::Prompt => match key.code {
      KeyCode::Esc => Action::PromptCancel,
      KeyCode::Enter => Action::PromptConfirm,
      KeyCode::Backspace => Action::PromptBackspace,
      KeyCode::Delete => Action::PromptDelete,
      KeyCode::Left => Action::PromptLeft,
      KeyCode::Right => Action::PromptRight,
      KeyCode::Home => Action::PromptHome,
      KeyCode::End => Action::PromptEnd,
      KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
        Action::PromptInput(c)
      }
      _ => Action::None,
    },
    InputMode::Normal => {
      let kb = normalize_key_event(key);
      config.normal_keys.get(&kb).cloned().unwrap_or(Action::None)
    }
  }
}

/// Remembers the previous left click so a second one on the same row inside
/// the configured window becomes a double click.
#[derive(Debug, Default)]
pub struct ClickTracker {
  last: Option<(usize, Instant)>,
}

impl ClickTracker {
  fn register(&mut self, row: usize, now: Instant, window: Duration) -> bool {
    let is_double = self
      .last
      .is_some_and(|(prev_row, at)| prev_row == row && now.duration_since(at) <= window);
    // A completed double click doesn't arm a third
    self.last = if is_double { None } else { Some((row, now)) };
    is_double
  }
}

/// Translates a mouse event over the listing body into an action.
/// `rows` is the area the listing rows occupy, `scroll_offset` the index of
/// the first visible row, `len` the number of entries.
pub fn map_mouse(
  mouse: MouseEvent,
  rows: Rect,
  scroll_offset: usize,
  len: usize,
  clicks: &mut ClickTracker,
  double_click: Duration,
) -> Action {
  match mouse.kind {
    MouseEventKind::ScrollDown => return Action::MoveDown,
    MouseEventKind::ScrollUp => return Action::MoveUp,
    _ => {}
  }

  let inside = mouse.column >= rows.x
    && mouse.column < rows.x + rows.width
    && mouse.row >= rows.y
    && mouse.row < rows.y + rows.height;
  if !inside {
    return Action::None;
  }
  let row = scroll_offset + (mouse.row - rows.y) as usize;
  if row >= len {
    return Action::None;
  }

  match mouse.kind {
    MouseEventKind::Down(MouseButton::Left) => {
      if clicks.register(row, Instant::now(), double_click) {
        Action::OpenRow(row)
      } else {
        Action::SelectRow(row)
      }
    }
    MouseEventKind::Down(MouseButton::Right) => Action::ContextMenuAt {
      row,
      x: mouse.column,
      y: mouse.row,
    },
    _ => Action::None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyEventState;

  fn key(code: KeyCode) -> KeyEvent {
    key_with_mod(code, KeyModifiers::NONE)
  }

  fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
      code,
      modifiers,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
      kind,
      column,
      row,
      modifiers: KeyModifiers::NONE,
    }
  }

  fn cfg() -> Config {
    Config::default()
  }

  #[test]
  fn test_normal_mode_navigation() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Normal, &c), Action::MoveDown);
    assert_eq!(map_key(key(KeyCode::Up), InputMode::Normal, &c), Action::MoveUp);
    assert_eq!(map_key(key(KeyCode::Enter), InputMode::Normal, &c), Action::Open);
    assert_eq!(map_key(key(KeyCode::Backspace), InputMode::Normal, &c), Action::GoUp);
    assert_eq!(
      map_key(key_with_mod(KeyCode::Left, KeyModifiers::ALT), InputMode::Normal, &c),
      Action::HistoryBack
    );
    assert_eq!(
      map_key(key_with_mod(KeyCode::Char('H'), KeyModifiers::SHIFT), InputMode::Normal, &c),
      Action::HistoryBack
    );
  }

  #[test]
  fn test_normal_mode_unbound_key() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('z')), InputMode::Normal, &c), Action::None);
  }

  #[test]
  fn test_prompt_mode() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Prompt, &c), Action::PromptInput('q'));
    assert_eq!(map_key(key(KeyCode::Enter), InputMode::Prompt, &c), Action::PromptConfirm);
    assert_eq!(map_key(key(KeyCode::Esc), InputMode::Prompt, &c), Action::PromptCancel);
    assert_eq!(map_key(key(KeyCode::Backspace), InputMode::Prompt, &c), Action::PromptBackspace);
    assert_eq!(map_key(key(KeyCode::Home), InputMode::Prompt, &c), Action::PromptHome);
    assert_eq!(
      map_key(key_with_mod(KeyCode::Char('v'), KeyModifiers::CONTROL), InputMode::Prompt, &c),
      Action::None
    );
  }

  #[test]
  fn test_context_menu_mode() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Down), InputMode::ContextMenu, &c), Action::MenuDown);
    assert_eq!(map_key(key(KeyCode::Char('k')), InputMode::ContextMenu, &c), Action::MenuUp);
    assert_eq!(map_key(key(KeyCode::Enter), InputMode::ContextMenu, &c), Action::MenuSelect);
    assert_eq!(map_key(key(KeyCode::Esc), InputMode::ContextMenu, &c), Action::MenuClose);
  }

  #[test]
  fn test_error_and_help_modes() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Esc), InputMode::Error, &c), Action::ErrorClose);
    assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Error, &c), Action::None);
    assert_eq!(map_key(key(KeyCode::Char('?')), InputMode::Help, &c), Action::ToggleHelp);
  }

  #[test]
  fn test_custom_config_remaps_key() {
    let mut c = cfg();
    let kb = crate::config::KeyBinding {
      code: KeyCode::Char('j'),
      modifiers: KeyModifiers::NONE,
    };
    c.normal_keys.insert(kb, Action::Quit);
    assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Normal, &c), Action::Quit);
  }

  #[test]
  fn test_click_tracker_double_click() {
    let mut t = ClickTracker::default();
    let window = Duration::from_millis(400);
    let start = Instant::now();
    assert!(!t.register(3, start, window));
    assert!(t.register(3, start + Duration::from_millis(100), window));
    // Third click starts over
    assert!(!t.register(3, start + Duration::from_millis(200), window));
  }

  #[test]
  fn test_click_tracker_different_row_or_slow() {
    let mut t = ClickTracker::default();
    let window = Duration::from_millis(400);
    let start = Instant::now();
    assert!(!t.register(1, start, window));
    assert!(!t.register(2, start + Duration::from_millis(50), window));
    assert!(!t.register(2, start + Duration::from_millis(900), window));
  }

  #[test]
  fn test_map_mouse_rows() {
    let rows = Rect::new(1, 3, 40, 10);
    let mut clicks = ClickTracker::default();
    let window = Duration::from_millis(400);

    let action = map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 4), rows, 2, 20, &mut clicks, window);
    assert_eq!(action, Action::SelectRow(3));

    let action = map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 4), rows, 2, 20, &mut clicks, window);
    assert_eq!(action, Action::OpenRow(3));

    let action = map_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 7, 3), rows, 0, 20, &mut clicks, window);
    assert_eq!(action, Action::ContextMenuAt { row: 0, x: 7, y: 3 });
  }

  #[test]
  fn test_map_mouse_outside_or_past_end() {
    let rows = Rect::new(0, 2, 40, 10);
    let mut clicks = ClickTracker::default();
    let window = Duration::from_millis(400);

    let above = map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 1), rows, 0, 20, &mut clicks, window);
    assert_eq!(above, Action::None);

    let past_end = map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 9), rows, 0, 3, &mut clicks, window);
    assert_eq!(past_end, Action::None);

    let scroll = map_mouse(mouse(MouseEventKind::ScrollDown, 0, 0), rows, 0, 3, &mut clicks, window);
    assert_eq!(scroll, Action::MoveDown);
  }
}
