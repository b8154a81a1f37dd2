pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod render;
pub mod site;
pub mod source;

pub use error::{Error, Result};
