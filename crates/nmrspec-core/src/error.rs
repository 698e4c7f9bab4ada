//! Error type shared by every spectrum operation.

use crate::enums::Layout;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectrumError {
    /// An axis that must hold paired samples has odd length, a dimension
    /// index is out of range, or tensor rank disagrees with the metadata.
    #[error("Shape error: {0}")]
    Shape(String),
    /// The operation makes no sense for the spectrum's current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    /// A layout-sensitive step found a layout it cannot convert.
    #[error("Unsupported layout {layout} at dimension {dim}: {context}")]
    UnsupportedLayout {
        layout: Layout,
        dim: usize,
        context: String,
    },
    #[error("Not implemented: {0}")]
    NotImplemented(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpectrumError {
    pub fn unsupported_layout(layout: Layout, dim: usize, context: impl Into<String>) -> Self {
        Self::UnsupportedLayout {
            layout,
            dim,
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpectrumError>;
