pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod markdown;
pub mod ui;

pub use error::{Error, Result};
