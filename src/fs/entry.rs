use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  File,
  Directory,
}

/// One row of a directory listing, as seen at the last refresh.
#[derive(Debug, Clone)]
pub struct DirEntry {
  pub path: PathBuf,
  pub name: String,
  pub kind: EntryKind,
  pub is_symlink: bool,
  pub size: u64,
  pub modified: Option<SystemTime>,
}

impl DirEntry {
  pub fn from_path(path: PathBuf) -> Self {
    let is_symlink = path.symlink_metadata().is_ok_and(|m| m.is_symlink());
    // Follow links so a link to a directory is navigable; dangling links
    // fall back to their own metadata.
    let metadata = path.metadata().or_else(|_| path.symlink_metadata());
    let kind = if metadata.as_ref().is_ok_and(|m| m.is_dir()) {
      EntryKind::Directory
    } else {
      EntryKind::File
    };
    let size = metadata.as_ref().map_or(0, |m| m.len());
    let modified = metadata.ok().and_then(|m| m.modified().ok());
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_default();

    Self {
      path,
      name,
      kind,
      is_symlink,
      size,
      modified,
    }
  }

  pub fn is_dir(&self) -> bool {
    self.kind == EntryKind::Directory
  }

  pub fn size_label(&self) -> String {
    match self.kind {
      EntryKind::Directory => String::new(),
      EntryKind::File => format!("{} bytes", group_thousands(self.size)),
    }
  }

  pub fn type_label(&self) -> String {
    match self.kind {
      EntryKind::Directory => "Folder".to_string(),
      EntryKind::File => extension_label(&self.name),
    }
  }

  pub fn modified_label(&self) -> String {
    self.modified.map(format_timestamp).unwrap_or_default()
  }
}

/// The name's suffix including the dot, or empty. Leading dots don't start
/// an extension, so `.bashrc` has none.
pub fn extension_label(name: &str) -> String {
  let trimmed = name.trim_start_matches('.');
  match trimmed.rfind('.') {
    Some(idx) => trimmed[idx..].to_string(),
    None => String::new(),
  }
}

pub fn group_thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

pub fn format_timestamp(time: SystemTime) -> String {
  let local: DateTime<Local> = time.into();
  local.format("%Y-%m-%d %H:%M:%S").to_string()
}
