use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Which filesystem operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
  List,
  Copy,
  Move,
  Delete,
  Rename,
}

impl fmt::Display for FsOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      FsOp::List => "list",
      FsOp::Copy => "copy",
      FsOp::Move => "move",
      FsOp::Delete => "delete",
      FsOp::Rename => "rename",
    };
    f.write_str(s)
  }
}

#[derive(Debug, Error)]
pub enum FsError {
  #[error("permission denied: {}", path.display())]
  PermissionDenied { path: PathBuf },

  #[error("not a valid directory: {}", path.display())]
  InvalidPath { path: PathBuf },

  #[error("cannot paste {} into itself", path.display())]
  PasteIntoSelf { path: PathBuf },

  #[error("{op} failed for {}: {source}", path.display())]
  OperationFailed {
    op: FsOp,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

pub type FsResult<T> = Result<T, FsError>;

impl FsError {
  /// Wraps an I/O error from `op` on `path`.
  pub fn op(op: FsOp, path: &Path, source: io::Error) -> Self {
    FsError::OperationFailed {
      op,
      path: path.to_path_buf(),
      source,
    }
  }

  /// Like [`FsError::op`], but lifts permission errors when listing.
  pub fn listing(path: &Path, source: io::Error) -> Self {
    if source.kind() == io::ErrorKind::PermissionDenied {
      FsError::PermissionDenied { path: path.to_path_buf() }
    } else {
      FsError::op(FsOp::List, path, source)
    }
  }
}
