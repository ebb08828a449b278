//! Syllabus Kernel Library
//!
//! Builds category → subcategory → item trees for the content admin
//! dashboard, and fetches their inputs from the admin API.
//! The `syllabus` binary is a command-line front end over this library.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod models;
pub mod variants;

pub use error::{ApiError, HierarchyError, LoadError};
pub use hierarchy::{Hierarchy, HierarchyBuilder, build_hierarchy};
