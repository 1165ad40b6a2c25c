pub mod runner;

pub use runner::{Pipeline, RunError, RunReport};
