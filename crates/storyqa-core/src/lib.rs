pub mod error;
pub mod models;
pub mod storage;
pub mod synth;

pub use error::{Error, Result};
