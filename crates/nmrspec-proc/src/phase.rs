//! Zero- and first-order phase correction of the innermost axis.

use ndarray::Axis;
use nmrspec_codec::SpectrumTensor;
use nmrspec_core::*;
use num_complex::Complex64;

use crate::spectrum::NmrSpectrum;

/// `npts` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, npts: usize) -> Vec<f64> {
    match npts {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (npts - 1) as f64;
            (0..npts).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Frequency offset (Hz) of every innermost-axis point, spanning
/// `[-sw/2, +sw/2]`.
pub fn frequency_axis(sw: f64, npts: usize) -> Vec<f64> {
    linspace(-sw / 2.0, sw / 2.0, npts)
}

/// Multiply every innermost-axis sample by `exp(i * (p0 + p1 * f))`.
///
/// The phase is used exactly as given; no degree/radian conversion is done.
/// The data must already hold complex samples. With `discard_imaginaries`
/// the result keeps only its real part.
pub fn phase<S: NmrSpectrum + ?Sized>(
    spec: &mut S,
    p0: f64,
    p1: f64,
    discard_imaginaries: bool,
) -> Result<()> {
    let last = spec.core().last_dim();
    let sw = spec.sw(last)?;
    let core = spec.core_mut();

    let data = match core.data_mut()? {
        SpectrumTensor::Complex(data) => data,
        SpectrumTensor::Real(_) => {
            return Err(SpectrumError::unsupported_layout(
                Layout::Real,
                last,
                "phase correction needs complex samples",
            ))
        }
    };

    let npts = data.len_of(Axis(last));
    let factors: Vec<Complex64> = frequency_axis(sw, npts)
        .into_iter()
        .map(|f| Complex64::from_polar(1.0, p0 + p1 * f))
        .collect();

    for mut lane in data.lanes_mut(Axis(last)) {
        for (z, w) in lane.iter_mut().zip(factors.iter()) {
            *z *= *w;
        }
    }

    if discard_imaginaries {
        let real = data.mapv(|c| c.re);
        core.set_data(SpectrumTensor::Real(real))?;
    }
    log::debug!(
        "phase p0={} p1={} over {} points (sw={} Hz, discard imaginaries: {})",
        p0,
        p1,
        npts,
        sw,
        discard_imaginaries
    );
    Ok(())
}
