//! # Science Fair Common Library
//!
//! Shared code for the science fair project service:
//! - Project lifecycle status and data model
//! - Lab journal mutations (notes, experiment results)
//! - Category guidance catalog, presentation slides, JSON export
//! - Configuration loading and root folder resolution
//! - SQLite schema, row access and the `ProjectStore` seam

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod journal;
pub mod models;
pub mod presentation;
pub mod status;
pub mod store;

pub use error::{Error, Result};
pub use status::{Direction, ProjectStatus};
pub use store::{ProjectStore, SqliteStore};
