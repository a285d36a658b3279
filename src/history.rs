use std::path::{Path, PathBuf};

/// Directories visited along the current branch, with a cursor at the one
/// being displayed. Never empty.
#[derive(Debug, Clone)]
pub struct History {
  entries: Vec<PathBuf>,
  cursor: usize,
}

impl History {
  pub fn new(start: PathBuf) -> Self {
    Self {
      entries: vec![start],
      cursor: 0,
    }
  }

  /// Records a navigation to `path`, discarding any forward entries.
  pub fn visit(&mut self, path: PathBuf) {
    if path == self.entries[self.cursor] {
      return;
    }
    self.entries.truncate(self.cursor + 1);
    self.entries.push(path);
    self.cursor = self.entries.len() - 1;
  }

  pub fn go_back(&mut self) -> Option<&Path> {
    if self.cursor == 0 {
      return None;
    }
    self.cursor -= 1;
    Some(&self.entries[self.cursor])
  }

  pub fn go_forward(&mut self) -> Option<&Path> {
    if self.cursor + 1 >= self.entries.len() {
      return None;
    }
    self.cursor += 1;
    Some(&self.entries[self.cursor])
  }

  pub fn current(&self) -> &Path {
    &self.entries[self.cursor]
  }

  pub fn can_go_back(&self) -> bool {
    self.cursor > 0
  }

  pub fn can_go_forward(&self) -> bool {
    self.cursor + 1 < self.entries.len()
  }

  pub fn entries(&self) -> &[PathBuf] {
    &self.entries
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }
}
