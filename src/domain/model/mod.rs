pub mod config;
pub mod package;

pub use config::*;
pub use package::*;
