//! Plan resolution report.

use std::fmt;

/// Summary of a plan resolution run.
#[derive(Debug, Clone)]
pub struct PlanReport {
    /// Platform the plan was resolved for.
    pub platform: String,
    /// Number of resolved libraries.
    pub libraries: usize,
    /// Total compile units collected across all libraries.
    pub compile_units: usize,
    /// Number of registered additional targets.
    pub targets: usize,
    /// Settings in scope during resolution.
    pub settings: usize,
    /// Resolution duration in milliseconds.
    pub duration_ms: u64,
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Plan Report ===")?;
        writeln!(f, "Platform: {}", self.platform)?;
        writeln!(f, "Duration: {} ms", self.duration_ms)?;
        writeln!(f)?;

        writeln!(f, "--- Artifacts ---")?;
        writeln!(f, "  Libraries:     {}", self.libraries)?;
        writeln!(f, "  Compile units: {}", self.compile_units)?;
        writeln!(f, "  Targets:       {}", self.targets)?;
        writeln!(f)?;

        writeln!(f, "--- Settings ---")?;
        writeln!(f, "  In scope: {}", self.settings)?;

        Ok(())
    }
}
