use std::path::Path;

use super::entry::DirEntry;
use super::error::{FsError, FsResult};

/// Lists the immediate children of `dir`, directories first, then by
/// case-insensitive name. Hidden entries are included.
pub fn list_dir(dir: &Path) -> FsResult<Vec<DirEntry>> {
  let read_dir = std::fs::read_dir(dir).map_err(|e| FsError::listing(dir, e))?;

  let mut entries = Vec::new();
  for entry in read_dir {
    let entry = entry.map_err(|e| FsError::listing(dir, e))?;
    entries.push(DirEntry::from_path(entry.path()));
  }

  sort_entries(&mut entries);
  Ok(entries)
}

pub fn sort_entries(entries: &mut [DirEntry]) {
  entries.sort_by(|a, b| {
    b.is_dir()
      .cmp(&a.is_dir())
      .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
      .then_with(|| a.name.cmp(&b.name))
  });
}
