pub mod bump;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod ui;
pub mod version_file;

pub use error::{ReleaseError, Result};
