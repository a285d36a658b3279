use std::path::Path;

/// Hands `path` to the platform's default application without waiting for it.
pub fn open_default(path: &Path) -> Result<(), String> {
  open::that_detached(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))
}
