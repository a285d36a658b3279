use std::io;
use std::path::{Path, PathBuf};

use super::error::{FsError, FsOp, FsResult};

/// Delete a path (file or directory) permanently.
pub fn delete_path(path: &Path) -> FsResult<()> {
  let result = if path.is_dir() && !path.is_symlink() {
    std::fs::remove_dir_all(path)
  } else {
    std::fs::remove_file(path)
  };
  result.map_err(|e| FsError::op(FsOp::Delete, path, e))
}

/// Copy a file or directory to `dest`. Directories are copied recursively and
/// merge into an existing directory at `dest`; files overwrite.
pub fn copy_path(source: &Path, dest: &Path) -> FsResult<()> {
  if resolve(source) == resolve(dest) {
    // fs::copy onto itself truncates the file
    return Err(FsError::op(
      FsOp::Copy,
      source,
      io::Error::new(io::ErrorKind::AlreadyExists, "source and destination are the same"),
    ));
  }
  if source.is_dir() {
    // Copying follows a symlinked source, so compare against its target
    let target = std::fs::canonicalize(source).unwrap_or_else(|_| resolve(source));
    ensure_not_into_self(source, &target, dest)?;
  }
  let result = if source.is_dir() {
    copy_dir_recursive(source, dest)
  } else {
    copy_file(source, dest)
  };
  result.map_err(|e| FsError::op(FsOp::Copy, source, e))
}

/// Move `source` to `dest` with a single rename, falling back to copy and
/// delete only when the two live on different filesystems.
pub fn move_path(source: &Path, dest: &Path) -> FsResult<()> {
  if source.is_dir() {
    ensure_not_into_self(source, &resolve(source), dest)?;
  }
  match std::fs::rename(source, dest) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
      tracing::debug!(source = %source.display(), "rename crosses devices, copying instead");
      copy_path(source, dest).map_err(|err| match err {
        FsError::OperationFailed { path: failed, source: e, .. } => FsError::OperationFailed {
          op: FsOp::Move,
          path: failed,
          source: e,
        },
        other => other,
      })?;
      delete_path(source)
    }
    Err(e) => Err(FsError::op(FsOp::Move, source, e)),
  }
}

/// Rename `path` to `new_name` inside the same directory. Refuses to replace
/// an existing entry, which a bare `rename` would silently do for files.
pub fn rename_in_place(path: &Path, new_name: &str) -> FsResult<PathBuf> {
  let parent = path.parent().unwrap_or(Path::new("."));
  let new_path = parent.join(new_name);
  if new_path == path {
    return Ok(new_path);
  }
  if new_path.symlink_metadata().is_ok() {
    return Err(FsError::op(
      FsOp::Rename,
      path,
      io::Error::new(io::ErrorKind::AlreadyExists, format!("{new_name} already exists")),
    ));
  }
  std::fs::rename(path, &new_path).map_err(|e| FsError::op(FsOp::Rename, path, e))?;
  Ok(new_path)
}

/// `path` with its parent directory resolved through any symlinks. The last
/// component is kept as is, so a link resolves to itself rather than its
/// target, and a destination that doesn't exist yet still resolves.
fn resolve(path: &Path) -> PathBuf {
  match (path.parent(), path.file_name()) {
    (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => std::fs::canonicalize(parent)
      .map(|p| p.join(name))
      .unwrap_or_else(|_| path.to_path_buf()),
    _ => std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
  }
}

/// Refuse to put the directory `resolved` inside its own subtree. `source` is
/// only used for the error.
fn ensure_not_into_self(source: &Path, resolved: &Path, dest: &Path) -> FsResult<()> {
  let dest = resolve(dest);
  if dest != resolved && dest.starts_with(resolved) {
    return Err(FsError::PasteIntoSelf { path: source.to_path_buf() });
  }
  Ok(())
}

fn copy_file(source: &Path, dest: &Path) -> io::Result<()> {
  std::fs::copy(source, dest)?;
  preserve_mtime(source, dest);
  Ok(())
}

/// Recursively copy a directory and all its contents.
fn copy_dir_recursive(source: &Path, dest: &Path) -> io::Result<()> {
  std::fs::create_dir_all(dest)?;
  for entry in std::fs::read_dir(source)? {
    let entry = entry?;
    let src_path = entry.path();
    let dst_path = dest.join(entry.file_name());
    if src_path.is_dir() {
      copy_dir_recursive(&src_path, &dst_path)?;
    } else {
      copy_file(&src_path, &dst_path)?;
    }
  }
  // Last, so creating children doesn't bump it
  preserve_mtime(source, dest);
  Ok(())
}

// Best effort: the data is already in place.
fn preserve_mtime(source: &Path, dest: &Path) {
  if let Ok(mtime) = std::fs::metadata(source).and_then(|m| m.modified()) {
    let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use std::sync::atomic::{AtomicU32, Ordering};
  use std::time::{Duration, SystemTime};

  static COUNTER: AtomicU32 = AtomicU32::new(0);

  fn test_dir(prefix: &str) -> PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("dex_ops_{prefix}_{id}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn test_copy_path_file() {
    let dir = test_dir("copy_file");
    let src = dir.join("src.txt");
    let dst = dir.join("dst.txt");
    fs::write(&src, "hello").unwrap();
    copy_path(&src, &dst).unwrap();
    assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
    assert!(src.exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_copy_path_preserves_mtime() {
    let dir = test_dir("copy_mtime");
    let src = dir.join("old.txt");
    let dst = dir.join("new.txt");
    fs::write(&src, "old").unwrap();
    let past = SystemTime::now() - Duration::from_secs(86_400 * 30);
    filetime::set_file_mtime(&src, filetime::FileTime::from_system_time(past)).unwrap();

    copy_path(&src, &dst).unwrap();
    let src_mtime = fs::metadata(&src).unwrap().modified().unwrap();
    let dst_mtime = fs::metadata(&dst).unwrap().modified().unwrap();
    assert_eq!(src_mtime, dst_mtime);
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_copy_dir_recursive() {
    let dir = test_dir("copy_dir");
    let src = dir.join("src_dir");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("a.txt"), "aaa").unwrap();
    fs::write(src.join("sub").join("b.txt"), "bbb").unwrap();

    let dst = dir.join("dst_dir");
    copy_path(&src, &dst).unwrap();

    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "aaa");
    assert_eq!(fs::read_to_string(dst.join("sub").join("b.txt")).unwrap(), "bbb");
    assert!(src.join("sub").join("b.txt").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_copy_dir_merges_into_existing() {
    let dir = test_dir("copy_merge");
    let src = dir.join("src");
    let dst = dir.join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(src.join("new.txt"), "new").unwrap();
    fs::write(dst.join("kept.txt"), "kept").unwrap();

    copy_path(&src, &dst).unwrap();
    assert!(dst.join("new.txt").exists());
    assert!(dst.join("kept.txt").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_copy_file_overwrites_existing() {
    let dir = test_dir("copy_overwrite");
    let src = dir.join("a.txt");
    let dst = dir.join("b.txt");
    fs::write(&src, "new").unwrap();
    fs::write(&dst, "old").unwrap();
    copy_path(&src, &dst).unwrap();
    assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_copy_onto_itself_keeps_content() {
    let dir = test_dir("copy_same");
    let src = dir.join("a.txt");
    fs::write(&src, "keep me").unwrap();
    let err = copy_path(&src, &src).unwrap_err();
    assert!(matches!(err, FsError::OperationFailed { op: FsOp::Copy, .. }));
    assert_eq!(fs::read_to_string(&src).unwrap(), "keep me");
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_copy_into_own_subtree_rejected() {
    let dir = test_dir("copy_self");
    let src = dir.join("parent");
    fs::create_dir_all(src.join("child")).unwrap();

    let err = copy_path(&src, &src.join("child").join("parent")).unwrap_err();
    assert!(matches!(err, FsError::PasteIntoSelf { .. }));
    assert!(!src.join("child").join("parent").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_copy_into_own_subtree_through_symlink_rejected() {
    let dir = test_dir("copy_self_link");
    let real = dir.join("real");
    fs::create_dir_all(&real).unwrap();
    fs::write(real.join("a.txt"), "a").unwrap();
    std::os::unix::fs::symlink(&real, dir.join("link")).unwrap();

    let err = copy_path(&real, &dir.join("link").join("real")).unwrap_err();
    assert!(matches!(err, FsError::PasteIntoSelf { .. }));
    assert!(!real.join("real").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_copy_onto_itself_through_symlinked_parent_keeps_content() {
    let dir = test_dir("copy_same_link");
    fs::create_dir_all(dir.join("real")).unwrap();
    fs::write(dir.join("real").join("a.txt"), "keep me").unwrap();
    std::os::unix::fs::symlink(dir.join("real"), dir.join("link")).unwrap();

    let err = copy_path(&dir.join("real").join("a.txt"), &dir.join("link").join("a.txt")).unwrap_err();
    assert!(matches!(err, FsError::OperationFailed { op: FsOp::Copy, .. }));
    assert_eq!(fs::read_to_string(dir.join("real").join("a.txt")).unwrap(), "keep me");
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_move_into_own_subtree_through_symlink_rejected() {
    let dir = test_dir("move_self_link");
    let real = dir.join("real");
    fs::create_dir_all(real.join("sub")).unwrap();
    std::os::unix::fs::symlink(real.join("sub"), dir.join("link")).unwrap();

    let err = move_path(&real, &dir.join("link").join("real")).unwrap_err();
    assert!(matches!(err, FsError::PasteIntoSelf { .. }));
    assert!(real.join("sub").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_move_symlink_into_its_target() {
    let dir = test_dir("move_link_in");
    fs::create_dir_all(dir.join("real")).unwrap();
    std::os::unix::fs::symlink(dir.join("real"), dir.join("link")).unwrap();

    move_path(&dir.join("link"), &dir.join("real").join("link")).unwrap();
    assert!(dir.join("real").join("link").is_symlink());
    assert!(!dir.join("link").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_move_path_file() {
    let dir = test_dir("move_file");
    fs::create_dir_all(dir.join("target")).unwrap();
    let src = dir.join("m.txt");
    fs::write(&src, "moving").unwrap();

    let dst = dir.join("target").join("m.txt");
    move_path(&src, &dst).unwrap();
    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "moving");
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_move_path_dir() {
    let dir = test_dir("move_dir");
    let src = dir.join("tree");
    fs::create_dir_all(src.join("inner")).unwrap();
    fs::write(src.join("inner").join("x"), "x").unwrap();
    fs::create_dir_all(dir.join("target")).unwrap();

    let dst = dir.join("target").join("tree");
    move_path(&src, &dst).unwrap();
    assert!(!src.exists());
    assert!(dst.join("inner").join("x").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_move_missing_source_fails() {
    let dir = test_dir("move_missing");
    let err = move_path(&dir.join("ghost"), &dir.join("dst")).unwrap_err();
    assert!(matches!(err, FsError::OperationFailed { op: FsOp::Move, .. }));
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_rename_in_place() {
    let dir = test_dir("rename");
    let file = dir.join("old.txt");
    fs::write(&file, "data").unwrap();

    let new_path = rename_in_place(&file, "new.txt").unwrap();
    assert_eq!(new_path, dir.join("new.txt"));
    assert!(!file.exists());
    assert_eq!(fs::read_to_string(&new_path).unwrap(), "data");
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_rename_onto_existing_fails() {
    let dir = test_dir("rename_exists");
    fs::write(dir.join("a.txt"), "a").unwrap();
    fs::write(dir.join("b.txt"), "b").unwrap();

    let err = rename_in_place(&dir.join("a.txt"), "b.txt").unwrap_err();
    assert!(matches!(err, FsError::OperationFailed { op: FsOp::Rename, .. }));
    assert!(err.to_string().contains("already exists"));
    assert_eq!(fs::read_to_string(dir.join("b.txt")).unwrap(), "b");
    assert!(dir.join("a.txt").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_rename_to_same_name_is_noop() {
    let dir = test_dir("rename_same");
    fs::write(dir.join("a.txt"), "a").unwrap();
    let path = rename_in_place(&dir.join("a.txt"), "a.txt").unwrap();
    assert_eq!(path, dir.join("a.txt"));
    assert!(path.exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_delete_path_file() {
    let dir = test_dir("delete_file");
    let file = dir.join("perm_delete.txt");
    fs::write(&file, "delete").unwrap();

    delete_path(&file).unwrap();
    assert!(!file.exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_delete_path_dir() {
    let dir = test_dir("delete_dir");
    let subdir = dir.join("perm_delete_dir");
    fs::create_dir_all(subdir.join("nested")).unwrap();
    fs::write(subdir.join("nested").join("inner.txt"), "inner").unwrap();

    delete_path(&subdir).unwrap();
    assert!(!subdir.exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_delete_symlink_keeps_target() {
    let dir = test_dir("delete_link");
    fs::create_dir_all(dir.join("real")).unwrap();
    fs::write(dir.join("real").join("keep.txt"), "keep").unwrap();
    std::os::unix::fs::symlink(dir.join("real"), dir.join("link")).unwrap();

    delete_path(&dir.join("link")).unwrap();
    assert!(!dir.join("link").exists());
    assert!(dir.join("real").join("keep.txt").exists());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_delete_missing_fails() {
    let dir = test_dir("delete_missing");
    let err = delete_path(&dir.join("ghost")).unwrap_err();
    assert!(matches!(err, FsError::OperationFailed { op: FsOp::Delete, .. }));
    let _ = fs::remove_dir_all(&dir);
  }
}
