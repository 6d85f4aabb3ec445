pub mod locator;
pub mod runner;

pub use locator::*;
pub use runner::*;
