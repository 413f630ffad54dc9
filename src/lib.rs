pub mod error;
pub mod fixer;
pub mod logging;
pub mod platform;
pub mod preflight;
pub mod process;
pub mod report;
pub mod steps;
pub mod test_utils;
pub mod workspace;

pub use error::FixError;
pub use fixer::{DependencyFixer, FixCommand, FixOptions, FixOutcome};
pub use platform::Platform;
pub use steps::{FixPlan, Phase};
