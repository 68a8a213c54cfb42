pub mod config;
pub mod outcome;

pub use config::{default_output_path, RunConfig};
pub use outcome::RunOutcome;
