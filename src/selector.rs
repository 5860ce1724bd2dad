//! Pattern-based check selection.
//!
//! A pattern is resolved against a check in this order:
//! 1. `*` matches everything.
//! 2. A group shortcut (`components`, `services`, `workloads`, `dependencies`)
//!    matches checks of that group. Shortcuts are tried before anything else so
//!    they never glob-match differently.
//! 3. The exact check ID matches that check.
//! 4. Anything else is a shell-style glob (`*`, `?`, `[...]`) over the ID.

use globset::{Glob, GlobMatcher};

use crate::check::{Check, CheckGroup};
use crate::error::{LintError, Result};

pub const WILDCARD: &str = "*";

/// A parsed selection pattern, compiled once and matched against many checks.
#[derive(Debug, Clone)]
pub enum Selector {
    All,
    Group(CheckGroup),
    Pattern { raw: String, matcher: GlobMatcher },
}

impl Selector {
    /// # Errors
    /// Returns `InvalidPattern` if the pattern is not a valid glob.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern == WILDCARD {
            return Ok(Self::All);
        }
        if let Some(group) = CheckGroup::from_shortcut(pattern) {
            return Ok(Self::Group(group));
        }
        let matcher = compile(pattern)?;
        Ok(Self::Pattern {
            raw: pattern.to_string(),
            matcher,
        })
    }

    #[must_use]
    pub fn matches(&self, check: &dyn Check) -> bool {
        match self {
            Self::All => true,
            Self::Group(group) => check.group() == *group,
            Self::Pattern { raw, matcher } => raw == check.id() || matcher.is_match(check.id()),
        }
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| LintError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Match a single check against a pattern.
///
/// # Errors
/// Returns `InvalidPattern` if the pattern has to be read as a glob and does not parse.
pub fn matches(check: &dyn Check, pattern: &str) -> Result<bool> {
    if pattern == WILDCARD {
        return Ok(true);
    }
    if let Some(group) = CheckGroup::from_shortcut(pattern) {
        return Ok(check.group() == group);
    }
    if pattern == check.id() {
        return Ok(true);
    }
    Ok(compile(pattern)?.is_match(check.id()))
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
