//! The spectrum interface and the processing engine built on it.
//!
//! Implement [`NmrSpectrum`] for a format (or use [`PipeSpectrum`] /
//! [`TableSpectrum`]) and get transpose, phase correction and Fourier
//! transform with layout-aware re-encoding of complex data.

pub mod formats;
pub mod ft;
pub mod history;
pub mod io;
pub mod phase;
pub mod pipeline;
pub mod spectrum;
pub mod transpose;

pub use formats::{LayoutTable, PipeSpectrum, TableSpectrum};
pub use ft::FtFlags;
pub use history::{LogEntry, ProcessingLog};
pub use io::SpectrumIo;
pub use pipeline::{Pipeline, ProcessingStep, StepArgs};
pub use spectrum::{NmrSpectrum, ResetAttr, SpectrumCore, DEFAULT_RESET_ATTRS};
