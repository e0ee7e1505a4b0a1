//! The build settings table.
//!
//! Settings are flat name -> value pairs, populated by a platform profile
//! (optionally overlaid by project configuration) before any declaration is
//! resolved. Source locations, include paths, and preprocessor defines may
//! reference a setting with a `$(NAME)` placeholder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A flat name -> value configuration table with deterministic iteration
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a named configuration value. Last write wins.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a setting by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of this table. Entries in `other` win.
    pub fn merge(&mut self, other: &Settings) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Substitute `$(NAME)` placeholders in `input` against the table.
    ///
    /// Expansion is a single pass; substituted values are not re-expanded.
    /// A `$` not followed by `(` passes through verbatim. Referencing an
    /// unset name or leaving a placeholder unclosed is an error.
    pub fn expand(&self, input: &str) -> Result<String> {
        let mut out = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }
            if !matches!(chars.peek(), Some('(')) {
                out.push('$');
                continue;
            }
            chars.next();

            let mut name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == ')' {
                    closed = true;
                    break;
                }
                name.push(c);
            }
            if !closed {
                return Err(CoreError::UnclosedPlaceholder {
                    input: input.to_string(),
                });
            }
            match self.get(&name) {
                Some(value) => out.push_str(value),
                None => return Err(CoreError::UndefinedSetting { name }),
            }
        }

        Ok(out)
    }
}
