pub mod acceptance;
pub mod config;
pub mod run;
pub mod test_case;

pub use acceptance::{AcField, DocumentError};
pub use config::{Config, Credentials, GeneratorConfig, LinkDirection};
pub use run::{fingerprint, RunMode};
pub use test_case::TestCase;
