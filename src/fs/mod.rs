pub mod entry;
pub mod error;
pub mod listing;
pub mod ops;

pub use entry::DirEntry;
pub use error::FsError;
pub use listing::list_dir;
