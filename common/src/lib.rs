mod config;
mod types;

pub use config::*;
pub use types::*;
