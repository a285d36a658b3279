use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::event::{InputMode, PromptKind};
use crate::fs::error::FsOp;
use crate::fs::{self, DirEntry, FsError, ops};
use crate::history::History;
use crate::opener;

/// How many ticks a status message stays visible.
const STATUS_TICKS: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
  Cut,
  Copy,
}

/// The single pending copy/cut. Pasting doesn't clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipboard {
  pub source: PathBuf,
  pub op: ClipboardOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
  Open,
  Copy,
  Cut,
  Paste,
  Delete,
  Rename,
}

impl MenuItem {
  pub fn label(self) -> &'static str {
    match self {
      MenuItem::Open => "Open",
      MenuItem::Copy => "Copy",
      MenuItem::Cut => "Cut",
      MenuItem::Paste => "Paste",
      MenuItem::Delete => "Delete",
      MenuItem::Rename => "Rename",
    }
  }
}

#[derive(Debug, Clone)]
pub struct ContextMenu {
  pub items: Vec<MenuItem>,
  pub selected: usize,
  pub x: u16,
  pub y: u16,
}

pub struct App {
  pub history: History,
  pub entries: Vec<DirEntry>,
  pub cursor: usize,
  pub scroll_offset: usize,
  pub viewport_height: usize,
  pub listing_rows: Rect,
  pub clipboard: Option<Clipboard>,
  pub input_mode: InputMode,
  pub prompt_kind: Option<PromptKind>,
  pub prompt_input: String,
  pub prompt_cursor: usize,
  pub prompt_target: Option<String>,
  pub context_menu: Option<ContextMenu>,
  pub status_message: Option<String>,
  pub status_ticks: u16,
  pub error_messages: Vec<String>,
  pub should_quit: bool,
  pub opener: fn(&Path) -> Result<(), String>,
}

impl App {
  /// Starts in `start`. A start directory that can't be listed still opens,
  /// with an empty listing and the error on screen.
  pub fn new(start: PathBuf) -> Self {
    let mut app = Self {
      history: History::new(start),
      entries: Vec::new(),
      cursor: 0,
      scroll_offset: 0,
      viewport_height: 20,
      listing_rows: Rect::default(),
      clipboard: None,
      input_mode: InputMode::Normal,
      prompt_kind: None,
      prompt_input: String::new(),
      prompt_cursor: 0,
      prompt_target: None,
      context_menu: None,
      status_message: None,
      status_ticks: 0,
      error_messages: Vec::new(),
      should_quit: false,
      opener: opener::open_default,
    };
    app.refresh();
    app
  }

  /// The directory on display, always the history entry under the cursor.
  pub fn current_dir(&self) -> &Path {
    self.history.current()
  }

  pub fn update(&mut self, action: Action) -> Result<()> {
    match action {
      Action::Quit => self.should_quit = true,
      Action::MoveDown => self.move_cursor(1),
      Action::MoveUp => self.move_cursor(-1),
      Action::GoToTop => {
        self.cursor = 0;
        self.scroll_offset = 0;
      }
      Action::GoToBottom => {
        self.cursor = self.entries.len().saturating_sub(1);
        self.adjust_scroll();
      }
      Action::Open => {
        if let Some(name) = self.selected_name() {
          self.navigate_into(&name);
        }
      }
      Action::GoUp => self.go_up(),
      Action::HistoryBack => self.go_back(),
      Action::HistoryForward => self.go_forward(),
      Action::GoHome => self.go_home(),
      Action::Refresh => {
        if self.refresh() {
          self.set_status("Refreshed".to_string());
        }
      }
      Action::PathEditStart => {
        let text = self.current_dir().to_string_lossy().to_string();
        self.start_prompt(PromptKind::GoToPath, text, None);
      }
      Action::CopyFile => {
        if let Some(name) = self.selected_name() {
          self.copy(&name);
        }
      }
      Action::CutFile => {
        if let Some(name) = self.selected_name() {
          self.cut(&name);
        }
      }
      Action::Paste => self.paste(),
      Action::DeleteFile => {
        if let Some(name) = self.selected_name() {
          self.request_delete(&name);
        }
      }
      Action::RenameStart => {
        if let Some(name) = self.selected_name() {
          self.start_prompt(PromptKind::Rename, name.clone(), Some(name));
        }
      }
      Action::ContextMenuOpen => {
        let x = self.listing_rows.x + 2;
        let y = self.listing_rows.y + self.cursor.saturating_sub(self.scroll_offset) as u16;
        self.open_context_menu(x, y);
      }
      Action::ContextMenuAt { row, x, y } => {
        self.select_row(row);
        self.open_context_menu(x, y);
      }
      Action::ToggleHelp => {
        self.input_mode = if self.input_mode == InputMode::Help {
          InputMode::Normal
        } else {
          InputMode::Help
        };
      }
      Action::PromptInput(c) => match self.prompt_kind {
        Some(PromptKind::ConfirmDelete) => {
          let target = self.prompt_target.clone();
          self.cancel_prompt();
          match target {
            Some(name) if c == 'y' || c == 'Y' => self.delete(&name),
            _ => self.set_status("Delete cancelled".to_string()),
          }
        }
        Some(_) => self.prompt_insert(c),
        None => {}
      },
      Action::PromptBackspace => {
        if self.prompt_cursor > 0 && self.prompt_kind != Some(PromptKind::ConfirmDelete) {
          self.prompt_cursor -= 1;
          let at = self.prompt_byte_index();
          self.prompt_input.remove(at);
        }
      }
      Action::PromptDelete => {
        if self.prompt_cursor < self.prompt_input.chars().count() {
          let at = self.prompt_byte_index();
          self.prompt_input.remove(at);
        }
      }
      Action::PromptLeft => self.prompt_cursor = self.prompt_cursor.saturating_sub(1),
      Action::PromptRight => {
        self.prompt_cursor = (self.prompt_cursor + 1).min(self.prompt_input.chars().count());
      }
      Action::PromptHome => self.prompt_cursor = 0,
      Action::PromptEnd => self.prompt_cursor = self.prompt_input.chars().count(),
      Action::PromptConfirm => self.confirm_prompt(),
      Action::PromptCancel => {
        if self.prompt_kind == Some(PromptKind::ConfirmDelete) {
          self.set_status("Delete cancelled".to_string());
        }
        self.cancel_prompt();
      }
      Action::MenuUp => {
        if let Some(menu) = self.context_menu.as_mut() {
          menu.selected = menu.selected.saturating_sub(1);
        }
      }
      Action::MenuDown => {
        if let Some(menu) = self.context_menu.as_mut() {
          menu.selected = (menu.selected + 1).min(menu.items.len().saturating_sub(1));
        }
      }
      Action::MenuSelect => {
        let item = self
          .context_menu
          .take()
          .and_then(|menu| menu.items.get(menu.selected).copied());
        self.input_mode = InputMode::Normal;
        if let Some(item) = item {
          self.run_menu_item(item);
        }
      }
      Action::MenuClose => {
        self.context_menu = None;
        self.input_mode = InputMode::Normal;
      }
      Action::ErrorClose => {
        self.error_messages.clear();
        self.input_mode = InputMode::Normal;
      }
      Action::SelectRow(row) => self.select_row(row),
      Action::OpenRow(row) => {
        self.select_row(row);
        if let Some(name) = self.selected_name() {
          self.navigate_into(&name);
        }
      }
      Action::Resize(_, h) => {
        // Toolbar, header row, status bar and borders
        self.viewport_height = h.saturating_sub(5) as usize;
        self.adjust_scroll();
      }
      Action::Tick => {
        if self.status_ticks > 0 {
          self.status_ticks -= 1;
        } else {
          self.status_message = None;
        }
      }
      Action::None => {}
    }
    Ok(())
  }

  /// Re-reads the current directory. On failure the error is shown and the
  /// previous listing stays.
  pub fn refresh(&mut self) -> bool {
    match fs::list_dir(self.current_dir()) {
      Ok(entries) => {
        debug!(dir = %self.current_dir().display(), count = entries.len(), "refreshed");
        self.entries = entries;
        self.clamp_cursor();
        true
      }
      Err(e) => {
        self.report(e);
        false
      }
    }
  }

  /// Enters `name` if it's a directory, otherwise opens it with the default
  /// application.
  pub fn navigate_into(&mut self, name: &str) {
    let path = self.current_dir().join(name);
    if path.is_dir() {
      self.visit(path);
    } else if path.symlink_metadata().is_err() {
      self.show_error(format!("{name} no longer exists"));
      self.refresh();
    } else {
      match (self.opener)(&path) {
        Ok(()) => {
          info!(path = %path.display(), "opened with default application");
          self.set_status(format!("Opened {name}"));
        }
        Err(e) => {
          warn!(path = %path.display(), error = %e, "open failed");
          self.set_status(e);
        }
      }
    }
  }

  /// Navigates to a typed path. Anything that isn't an existing directory is
  /// rejected without changing state.
  pub fn go_to_typed_path(&mut self, text: &str) -> bool {
    let text = text.trim();
    let path = expand_home(text);
    let path = if path.is_absolute() {
      path
    } else {
      self.current_dir().join(path)
    };

    if text.is_empty() || !path.is_dir() {
      self.report(FsError::InvalidPath { path });
      return false;
    }

    self.visit(path)
  }

  pub fn go_up(&mut self) {
    let Some(parent) = self.current_dir().parent().map(Path::to_path_buf) else {
      return;
    };
    if parent == self.current_dir() {
      return;
    }
    let left = self.current_dir().to_path_buf();
    if self.visit(parent) {
      self.reposition_cursor_to(&left);
    }
  }

  pub fn go_back(&mut self) {
    let Some(target) = self.history.go_back().map(Path::to_path_buf) else {
      return;
    };
    if !self.load(target) {
      self.history.go_forward();
    }
  }

  pub fn go_forward(&mut self) {
    let Some(target) = self.history.go_forward().map(Path::to_path_buf) else {
      return;
    };
    if !self.load(target) {
      self.history.go_back();
    }
  }

  pub fn go_home(&mut self) {
    match dirs::home_dir() {
      Some(home) => {
        self.visit(home);
      }
      None => self.show_error("Could not determine home directory".to_string()),
    }
  }

  pub fn copy(&mut self, name: &str) {
    self.clipboard = Some(Clipboard {
      source: self.current_dir().join(name),
      op: ClipboardOp::Copy,
    });
    self.set_status(format!("Copied: {name}"));
  }

  pub fn cut(&mut self, name: &str) {
    self.clipboard = Some(Clipboard {
      source: self.current_dir().join(name),
      op: ClipboardOp::Cut,
    });
    self.set_status(format!("Cut: {name}"));
  }

  /// Copies or moves the clipboard source into the current directory under
  /// its own name. Existing entries of that name are left to the underlying
  /// copy/move to deal with.
  pub fn paste(&mut self) {
    let Some(Clipboard { source, op }) = self.clipboard.clone() else {
      self.set_status("Nothing to paste".to_string());
      return;
    };
    if source.symlink_metadata().is_err() {
      self.set_status(format!("Source no longer exists: {}", source.display()));
      return;
    }
    let Some(file_name) = source.file_name() else {
      return;
    };
    let dest = self.current_dir().join(file_name);

    if op == ClipboardOp::Cut && dest == source {
      self.set_status("Already here".to_string());
      return;
    }

    let result = match op {
      ClipboardOp::Copy => ops::copy_path(&source, &dest),
      ClipboardOp::Cut => ops::move_path(&source, &dest),
    };

    match result {
      Ok(()) => {
        info!(?op, source = %source.display(), dest = %dest.display(), "pasted");
        self.refresh();
        self.reposition_cursor_to(&dest);
        self.set_status(format!("Pasted: {}", file_name.to_string_lossy()));
      }
      Err(e) => self.report(e),
    }
  }

  /// Asks for confirmation before deleting `name`.
  pub fn request_delete(&mut self, name: &str) {
    self.start_prompt(PromptKind::ConfirmDelete, String::new(), Some(name.to_string()));
    self.set_status(format!("Delete {name}? (y/N)"));
  }

  /// Removes `name` for good. Only reachable through a confirmed prompt.
  fn delete(&mut self, name: &str) {
    let path = self.current_dir().join(name);
    match ops::delete_path(&path) {
      Ok(()) => {
        info!(path = %path.display(), "deleted");
        self.refresh();
        self.set_status(format!("Deleted: {name}"));
      }
      Err(e) => self.report(e),
    }
  }

  pub fn rename(&mut self, name: &str, new_name: &str) {
    let new_name = new_name.trim();
    if new_name.is_empty() || new_name == name {
      return;
    }
    let path = self.current_dir().join(name);
    if new_name.contains(std::path::MAIN_SEPARATOR) || new_name == "." || new_name == ".." {
      let invalid = io::Error::new(io::ErrorKind::InvalidInput, format!("invalid name {new_name:?}"));
      self.report(FsError::op(FsOp::Rename, &path, invalid));
      return;
    }

    match ops::rename_in_place(&path, new_name) {
      Ok(new_path) => {
        info!(from = %path.display(), to = %new_path.display(), "renamed");
        if let Some(clip) = self.clipboard.as_mut()
          && clip.source == path
        {
          clip.source = new_path.clone();
        }
        self.refresh();
        self.reposition_cursor_to(&new_path);
        self.set_status(format!("Renamed to {new_name}"));
      }
      Err(e) => self.report(e),
    }
  }

  pub fn show_error(&mut self, message: String) {
    self.error_messages.push(message);
    self.input_mode = InputMode::Error;
  }

  pub fn show_errors(&mut self, messages: Vec<String>) {
    for message in messages {
      self.show_error(message);
    }
  }

  pub fn set_status(&mut self, message: String) {
    self.status_message = Some(message);
    self.status_ticks = STATUS_TICKS;
  }

  pub fn selected_entry(&self) -> Option<&DirEntry> {
    self.entries.get(self.cursor)
  }

  pub fn is_cut(&self, entry: &DirEntry) -> bool {
    self
      .clipboard
      .as_ref()
      .is_some_and(|c| c.op == ClipboardOp::Cut && c.source == entry.path)
  }

  /// Records where the listing rows were drawn, for mouse hit-testing and
  /// scrolling.
  pub fn set_listing_rows(&mut self, rows: Rect) {
    self.listing_rows = rows;
    self.viewport_height = rows.height as usize;
    self.adjust_scroll();
  }

  fn selected_name(&self) -> Option<String> {
    self.selected_entry().map(|e| e.name.clone())
  }

  /// History-recording navigation. History holds resolved paths, so a
  /// directory reached through a symlink is recorded under its target.
  fn visit(&mut self, dir: PathBuf) -> bool {
    let dir = std::fs::canonicalize(&dir).unwrap_or(dir);
    match fs::list_dir(&dir) {
      Ok(entries) => {
        info!(dir = %dir.display(), "visit");
        self.history.visit(dir);
        debug!(
          position = self.history.cursor() + 1,
          depth = self.history.entries().len(),
          "history"
        );
        self.show_listing(entries);
        true
      }
      Err(e) => {
        self.report(e);
        false
      }
    }
  }

  /// Navigation that leaves the history alone (back/forward).
  fn load(&mut self, dir: PathBuf) -> bool {
    match fs::list_dir(&dir) {
      Ok(entries) => {
        info!(dir = %dir.display(), "history step");
        self.show_listing(entries);
        true
      }
      Err(e) => {
        self.report(e);
        false
      }
    }
  }

  fn show_listing(&mut self, entries: Vec<DirEntry>) {
    self.entries = entries;
    self.cursor = 0;
    self.scroll_offset = 0;
  }

  fn report(&mut self, err: FsError) {
    warn!(error = %err, "filesystem operation failed");
    self.show_error(err.to_string());
  }

  fn move_cursor(&mut self, delta: i32) {
    if self.entries.is_empty() {
      return;
    }
    let len = self.entries.len();
    if delta > 0 {
      self.cursor = (self.cursor + delta as usize).min(len - 1);
    } else {
      self.cursor = self.cursor.saturating_sub((-delta) as usize);
    }
    self.adjust_scroll();
  }

  fn select_row(&mut self, row: usize) {
    if row < self.entries.len() {
      self.cursor = row;
      self.adjust_scroll();
    }
  }

  fn clamp_cursor(&mut self) {
    self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
    self.adjust_scroll();
  }

  fn adjust_scroll(&mut self) {
    let visible = self.viewport_height;
    if visible == 0 {
      return;
    }
    if self.cursor < self.scroll_offset {
      self.scroll_offset = self.cursor;
    } else if self.cursor >= self.scroll_offset + visible {
      self.scroll_offset = self.cursor - visible + 1;
    }
  }

  fn reposition_cursor_to(&mut self, path: &Path) {
    if let Some(pos) = self.entries.iter().position(|e| e.path == path) {
      self.cursor = pos;
      self.adjust_scroll();
    }
  }

  fn open_context_menu(&mut self, x: u16, y: u16) {
    let items = if self.selected_entry().is_some() {
      vec![
        MenuItem::Open,
        MenuItem::Copy,
        MenuItem::Cut,
        MenuItem::Paste,
        MenuItem::Delete,
        MenuItem::Rename,
      ]
    } else {
      vec![MenuItem::Paste]
    };
    self.context_menu = Some(ContextMenu { items, selected: 0, x, y });
    self.input_mode = InputMode::ContextMenu;
  }

  fn run_menu_item(&mut self, item: MenuItem) {
    if item == MenuItem::Paste {
      self.paste();
      return;
    }
    let Some(name) = self.selected_name() else {
      return;
    };
    match item {
      MenuItem::Open => self.navigate_into(&name),
      MenuItem::Copy => self.copy(&name),
      MenuItem::Cut => self.cut(&name),
      MenuItem::Delete => self.request_delete(&name),
      MenuItem::Rename => self.start_prompt(PromptKind::Rename, name.clone(), Some(name)),
      MenuItem::Paste => {}
    }
  }

  fn start_prompt(&mut self, kind: PromptKind, initial: String, target: Option<String>) {
    self.prompt_cursor = initial.chars().count();
    self.prompt_input = initial;
    self.prompt_kind = Some(kind);
    self.prompt_target = target;
    self.input_mode = InputMode::Prompt;
  }

  fn confirm_prompt(&mut self) {
    let kind = self.prompt_kind;
    let input = std::mem::take(&mut self.prompt_input);
    let target = self.prompt_target.clone();
    self.cancel_prompt();
    match (kind, target) {
      (Some(PromptKind::GoToPath), _) => {
        self.go_to_typed_path(&input);
      }
      (Some(PromptKind::Rename), Some(name)) => self.rename(&name, &input),
      // Enter means the default answer, which is no
      (Some(PromptKind::ConfirmDelete), _) => self.set_status("Delete cancelled".to_string()),
      _ => {}
    }
  }

  fn cancel_prompt(&mut self) {
    self.input_mode = InputMode::Normal;
    self.prompt_kind = None;
    self.prompt_input.clear();
    self.prompt_cursor = 0;
    self.prompt_target = None;
  }

  fn prompt_insert(&mut self, c: char) {
    let at = self.prompt_byte_index();
    self.prompt_input.insert(at, c);
    self.prompt_cursor += 1;
  }

  fn prompt_byte_index(&self) -> usize {
    self
      .prompt_input
      .char_indices()
      .nth(self.prompt_cursor)
      .map_or(self.prompt_input.len(), |(i, _)| i)
  }
}

fn expand_home(text: &str) -> PathBuf {
  if text == "~" {
    return dirs::home_dir().unwrap_or_else(|| PathBuf::from(text));
  }
  if let Some(rest) = text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  PathBuf::from(text)
}
