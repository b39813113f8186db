//! Book Library
//!
//! 蔵書コレクションの永続化・操作とCLI

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod prompt;
pub mod render;
pub mod storage;
pub mod store;

pub use library::{Library, LibraryEntry, STORAGE_KEY};
pub use store::{LoadOrigin, PersistedStore};
