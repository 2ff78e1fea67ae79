//! Database schema and row access

pub mod accounts;
pub mod data_points;
pub mod files;
pub mod init;
pub mod projects;
mod rows;

pub use init::*;
