//! `SQLite` story store for taleteller.
//!
//! Implements the [`StoryRepository`](taleteller_core::StoryRepository) port
//! with sqlx. The pool never leaks through the port signatures; entry points
//! call [`setup_database`] once and hand the repository to whoever needs it.
#![deny(unused_crate_dependencies)]

// Linked for the bundled SQLite build only
use libsqlite3_sys as _;

pub mod repositories;
pub mod setup;

pub use repositories::SqliteStoryRepository;
pub use setup::{setup_database, setup_test_database};
