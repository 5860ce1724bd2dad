use crate::check::CheckExecution;
use crate::error::Result;

use super::{OutputFormatter, Report};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, executions: &[CheckExecution]) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Report::new(executions))?)
    }
}
