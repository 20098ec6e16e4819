pub mod config;
pub mod db;
pub mod duplicates;
pub mod error;
pub mod import_export;
pub mod items;
pub mod models;
pub mod repository;
pub mod tags;
pub mod utils;

// Re-export error types for convenience
pub use error::{FavedError, Result};
pub use repository::Repository;
