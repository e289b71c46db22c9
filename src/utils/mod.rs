//! Utility modules: directories, JSON files, logging.

pub mod logging;
pub mod persistence;
