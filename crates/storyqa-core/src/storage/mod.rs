pub mod artifacts;

pub use artifacts::{ArtifactStorage, DEFAULT_OUTPUT_DIR};
