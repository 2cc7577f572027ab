//! Filesystem layer for CAPL Tools
//!
//! Provides safe whole-file I/O: UTF-8 reads, atomic writes, and
//! backup-on-overwrite. No partial or streaming access — every read and
//! write is a single scoped acquisition.

pub mod constants;
pub mod error;
pub mod io;

pub use constants::{BACKUP_SUFFIX, CAPL_EXTENSIONS, is_capl_file};
pub use error::{Error, Result};
pub use io::{backup_path, create_backup, read_text, write_atomic};
