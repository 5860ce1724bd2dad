pub mod builder;
pub mod check;
pub mod checks;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod output;
pub mod reader;
pub mod registry;
pub mod result;
pub mod selector;

pub use check::{Check, CheckExecution, CheckGroup, CheckMeta, Target};
pub use context::RunContext;
pub use error::{LintError, Result};
pub use executor::{ExecutionSummary, Executor};
pub use registry::CheckRegistry;
pub use result::DiagnosticResult;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECKS_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
mod test_support;
