use crate::check::CheckExecution;
use crate::error::Result;

use super::{OutputFormatter, Report};

pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, executions: &[CheckExecution]) -> Result<String> {
        Ok(serde_yaml::to_string(&Report::new(executions))?)
    }
}
