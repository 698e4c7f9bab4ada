//! Enumerations for dimension domain, sample data type, storage layout and
//! save formats.
//!
//! Domain and data type codes follow the NMRPipe header conventions
//! (`NDFTFLAG`, `NDQUADFLAG`) so loaders can map header values directly.

use crate::error::SpectrumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Domain Type (NDFTFLAG) ─────────────────────────────────────────────────

/// Whether a dimension's samples are in the time or frequency domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum DomainType {
    /// Time domain (FID).
    Time = 0,
    /// Frequency domain (spectrum).
    Freq = 1,
}

impl DomainType {
    /// Map an NMRPipe `FTFLAG` value: zero is time domain, anything else
    /// is frequency domain.
    pub fn from_ft_flag(v: i32) -> Self {
        if v == 0 {
            Self::Time
        } else {
            Self::Freq
        }
    }

    /// The opposite domain, as produced by a Fourier transform.
    pub fn flipped(self) -> Self {
        match self {
            Self::Time => Self::Freq,
            Self::Freq => Self::Time,
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => write!(f, "Time"),
            Self::Freq => write!(f, "Freq"),
        }
    }
}

impl FromStr for DomainType {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time" => Ok(Self::Time),
            "freq" | "frequency" => Ok(Self::Freq),
            other => Err(SpectrumError::Parse(format!("unknown domain type '{}'", other))),
        }
    }
}

// ─── Data Type (NDQUADFLAG) ─────────────────────────────────────────────────

/// How a dimension's samples are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum DataType {
    /// Quadrature detected: real and imaginary pairs.
    Complex = 0,
    /// Real-only (singlature).
    Real = 1,
    /// Imaginary-only.
    Imag = 2,
}

impl DataType {
    /// Map an NMRPipe `QUADFLAG` value.
    ///
    /// Pseudo-quad (2) is stored as real; states-echo and gradient
    /// acquisitions (3, 4) hold quadrature pairs.
    pub fn from_quad_flag(v: i32) -> Option<Self> {
        match v {
            0 | 3 | 4 => Some(Self::Complex),
            1 | 2 => Some(Self::Real),
            _ => None,
        }
    }

    pub fn is_complex(self) -> bool {
        self == Self::Complex
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complex => write!(f, "Complex"),
            Self::Real => write!(f, "Real"),
            Self::Imag => write!(f, "Imag"),
        }
    }
}

impl FromStr for DataType {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "complex" => Ok(Self::Complex),
            "real" => Ok(Self::Real),
            "imag" | "imaginary" => Ok(Self::Imag),
            other => Err(SpectrumError::Parse(format!("unknown data type '{}'", other))),
        }
    }
}

// ─── Storage Layout ─────────────────────────────────────────────────────────

/// How values along one tensor axis are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Plain real samples (real- or imaginary-only dimensions).
    Real,
    /// Complex-native samples with no real-valued encoding.
    Complex,
    /// `r0, i0, r1, i1, ...` along a real axis of length 2N.
    SingleInterleave,
    /// `r0 .. rN-1, i0 .. iN-1` along a real axis of length 2N.
    BlockInterleave,
}

impl Layout {
    /// True for the two encodings that pack complex values into 2N reals.
    pub fn is_interleaved(self) -> bool {
        matches!(self, Self::SingleInterleave | Self::BlockInterleave)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => write!(f, "Real"),
            Self::Complex => write!(f, "Complex"),
            Self::SingleInterleave => write!(f, "SingleInterleave"),
            Self::BlockInterleave => write!(f, "BlockInterleave"),
        }
    }
}

// ─── Save Formats ───────────────────────────────────────────────────────────

/// Output formats a saver may be asked for. There is no implicit default:
/// callers always name one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveFormat {
    NmrPipe,
    Ucsf,
    Sparky,
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NmrPipe => write!(f, "nmrpipe"),
            Self::Ucsf => write!(f, "ucsf"),
            Self::Sparky => write!(f, "sparky"),
        }
    }
}

impl FromStr for SaveFormat {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nmrpipe" | "pipe" => Ok(Self::NmrPipe),
            "ucsf" => Ok(Self::Ucsf),
            "sparky" => Ok(Self::Sparky),
            other => Err(SpectrumError::Parse(format!("unknown save format '{}'", other))),
        }
    }
}
