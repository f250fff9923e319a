//! File actions module.
//!
//! Provides the delete policy: permanent removal of every duplicate while
//! the original of each group is kept.
//!
//! ```no_run
//! use audiodedupe::actions::delete::permanent_delete;
//! use std::path::Path;
//!
//! let result = permanent_delete(Path::new("/music/copy of song.mp3"));
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_batch, delete_duplicates, permanent_delete, BatchDeleteResult, DeleteError,
    DeleteResult,
};
