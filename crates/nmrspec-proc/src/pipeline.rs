//! Serializable processing steps and pipelines.
//!
//! A pipeline is a JSON list of steps such as
//!
//! ```json
//! [
//!   { "op": "ft", "bruk": true },
//!   { "op": "phase", "p0": 0.5, "p1": 0.0 },
//!   { "op": "transpose", "dim0": 0, "dim1": 1 }
//! ]
//! ```
//!
//! run in order against any [`NmrSpectrum`]. Caller key/value arguments
//! ([`StepArgs`]) are handed back untouched after the last step.

use std::collections::BTreeMap;
use std::fmt;

use nmrspec_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ft::FtFlags;
use crate::history::ProcessingLog;
use crate::spectrum::NmrSpectrum;

/// Free-form caller arguments carried through a pipeline run.
pub type StepArgs = BTreeMap<String, Value>;

fn default_true() -> bool {
    true
}

/// One processing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProcessingStep {
    Transpose {
        dim0: usize,
        dim1: usize,
        #[serde(default = "default_true")]
        interleave_complex: bool,
    },
    Phase {
        #[serde(default)]
        p0: f64,
        #[serde(default)]
        p1: f64,
        #[serde(default = "default_true")]
        discard_imaginaries: bool,
    },
    Ft(FtFlags),
}

impl ProcessingStep {
    /// Short operation name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ProcessingStep::Transpose { .. } => "Transpose",
            ProcessingStep::Phase { .. } => "Phase",
            ProcessingStep::Ft(_) => "Fourier Transform",
        }
    }

    pub fn apply<S: NmrSpectrum + ?Sized>(&self, spec: &mut S) -> Result<()> {
        match self {
            ProcessingStep::Transpose {
                dim0,
                dim1,
                interleave_complex,
            } => spec.transpose(*dim0, *dim1, *interleave_complex),
            ProcessingStep::Phase {
                p0,
                p1,
                discard_imaginaries,
            } => spec.phase(*p0, *p1, *discard_imaginaries),
            ProcessingStep::Ft(flags) => spec.ft(flags),
        }
    }
}

impl fmt::Display for ProcessingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingStep::Transpose {
                dim0,
                dim1,
                interleave_complex,
            } => {
                write!(f, "Transpose {} <-> {}", dim0, dim1)?;
                if !interleave_complex {
                    write!(f, " (no re-encoding)")?;
                }
                Ok(())
            }
            ProcessingStep::Phase {
                p0,
                p1,
                discard_imaginaries,
            } => {
                write!(f, "Phase (P0={:.4}, P1={:.6})", p0, p1)?;
                if *discard_imaginaries {
                    write!(f, ", imaginaries discarded")?;
                }
                Ok(())
            }
            ProcessingStep::Ft(flags) => {
                let set: Vec<&str> = [
                    ("auto", flags.auto),
                    ("real", flags.real),
                    ("inv", flags.inv),
                    ("alt", flags.alt),
                    ("neg", flags.neg),
                    ("bruk", flags.bruk),
                ]
                .iter()
                .filter(|(_, on)| *on)
                .map(|(name, _)| *name)
                .collect();
                if set.is_empty() {
                    write!(f, "Fourier Transform")
                } else {
                    write!(f, "Fourier Transform ({})", set.join(", "))
                }
            }
        }
    }
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    pub steps: Vec<ProcessingStep>,
}

impl Pipeline {
    pub fn new(steps: Vec<ProcessingStep>) -> Self {
        Self { steps }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step in order, recording each one in `log`.
    ///
    /// Stops at the first failing step; steps already applied stay applied
    /// and stay logged. `args` is returned unchanged on success.
    pub fn run<S: NmrSpectrum + ?Sized>(
        &self,
        spec: &mut S,
        args: StepArgs,
        log: &mut ProcessingLog,
    ) -> Result<StepArgs> {
        for (i, step) in self.steps.iter().enumerate() {
            log::info!("step {}/{}: {}", i + 1, self.steps.len(), step);
            if let Err(err) = step.apply(spec) {
                log::warn!("step {} ({}) failed: {}", i + 1, step.name(), err);
                return Err(err);
            }
            log.add_step(step);
        }
        Ok(args)
    }
}
