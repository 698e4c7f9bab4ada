//! Fourier transform of the innermost axis with NMR pre/post-processing flags.

use ndarray::{ArrayD, Axis, Slice};
use nmrspec_codec::{transform_last_axis, FftDirection, SpectrumTensor};
use nmrspec_core::*;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::spectrum::NmrSpectrum;

/// Fourier transform options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FtFlags {
    /// Pick the flags automatically. Formats must resolve this themselves
    /// before calling [`ft`].
    pub auto: bool,
    /// Real transform: zero the imaginary parts first.
    pub real: bool,
    /// Inverse transform.
    pub inv: bool,
    /// Alternate the sign of odd-indexed points.
    pub alt: bool,
    /// Negate the imaginary parts first.
    pub neg: bool,
    /// Bruker/Redfield sequential data; implies `real` and `alt`.
    pub bruk: bool,
}

impl FtFlags {
    pub fn forward() -> Self {
        Self::default()
    }

    pub fn inverse() -> Self {
        Self {
            inv: true,
            ..Self::default()
        }
    }

    /// Flags after applying the `bruk` implication.
    pub fn resolved(&self) -> Self {
        let mut flags = *self;
        if flags.bruk {
            flags.real = true;
            flags.alt = true;
        }
        flags
    }
}

/// Negate every odd-indexed sample along the last axis.
fn negate_odd_points(data: &mut ArrayD<Complex64>) {
    if data.ndim() == 0 {
        return;
    }
    let axis = Axis(data.ndim() - 1);
    if data.len_of(axis) < 2 {
        return;
    }
    data.slice_axis_mut(axis, Slice::new(1, None, 2))
        .mapv_inplace(|c| -c);
}

/// Transform the innermost axis of `spec` in place.
///
/// Real tensors are promoted to complex. Domain and data type records are
/// left alone; formats that track them update the records themselves.
pub fn ft<S: NmrSpectrum + ?Sized>(spec: &mut S, flags: &FtFlags) -> Result<()> {
    if flags.auto {
        return Err(SpectrumError::NotImplemented(
            "automatic FT flag selection must be resolved by the spectrum format".into(),
        ));
    }
    let flags = flags.resolved();

    let core = spec.core_mut();
    let mut data = core.take_data()?.into_complex();

    if flags.real {
        data.mapv_inplace(|c| Complex64::new(c.re, 0.0));
    }
    let direction = if flags.inv {
        FftDirection::Inverse
    } else {
        FftDirection::Forward
    };
    if flags.alt && !flags.inv {
        negate_odd_points(&mut data);
    }
    if flags.neg {
        data.mapv_inplace(|c| c.conj());
    }

    transform_last_axis(&mut data, direction);

    if flags.inv && flags.alt {
        negate_odd_points(&mut data);
    }

    log::debug!("ft {:?} over shape {:?}", flags, data.shape());
    core.set_data(SpectrumTensor::Complex(data))
}
