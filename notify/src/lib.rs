#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod payload;
pub mod send;

pub use cli::run_from_env;
pub use error::{NotifyError, Result};
