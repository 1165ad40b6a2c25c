pub mod loader;

pub use loader::{load, load_with};
