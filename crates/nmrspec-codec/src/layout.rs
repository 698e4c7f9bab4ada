//! Conversions between complex tensors and their real-valued encodings.
//!
//! All functions act on the last axis only and leave every other axis
//! untouched. They are pure reindexing, so every conversion composed with its
//! inverse reproduces the input bit for bit.
//!
//! ```text
//!   complex      c0        c1        c2
//!   block        r0 r1 r2  i0 i1 i2
//!   single       r0 i0  r1 i1  r2 i2
//! ```

use ndarray::{ArrayD, Axis, IxDyn, Zip};
use nmrspec_core::{Layout, Result, SpectrumError};
use num_complex::Complex64;

/// Last axis of `shape` and its length.
fn last_axis(shape: &[usize], op: &str) -> Result<(Axis, usize)> {
    match shape.last() {
        Some(&len) => Ok((Axis(shape.len() - 1), len)),
        None => Err(SpectrumError::Shape(format!(
            "{}: rank-0 tensor has no last axis",
            op
        ))),
    }
}

/// Last axis of `shape` and the number of complex pairs it holds.
fn paired_axis(shape: &[usize], op: &str) -> Result<(Axis, usize)> {
    let (axis, len) = last_axis(shape, op)?;
    if len % 2 != 0 {
        return Err(SpectrumError::Shape(format!(
            "{}: last axis length {} is odd, expected real/imaginary pairs",
            op, len
        )));
    }
    Ok((axis, len / 2))
}

fn with_last_len(shape: &[usize], len: usize) -> IxDyn {
    let mut dims = shape.to_vec();
    if let Some(last) = dims.last_mut() {
        *last = len;
    }
    IxDyn(&dims)
}

/// `[..., 2N]` block-interleaved reals → `[..., N]` complex.
pub fn split_block_to_complex(real: &ArrayD<f64>) -> Result<ArrayD<Complex64>> {
    let (axis, n) = paired_axis(real.shape(), "split_block_to_complex")?;
    let mut out = ArrayD::<Complex64>::zeros(with_last_len(real.shape(), n));

    Zip::from(out.lanes_mut(axis))
        .and(real.lanes(axis))
        .for_each(|mut dst, src| {
            for k in 0..n {
                dst[k] = Complex64::new(src[k], src[k + n]);
            }
        });
    Ok(out)
}

/// `[..., N]` complex → `[..., 2N]` block-interleaved reals.
pub fn combine_block_from_complex(cplx: &ArrayD<Complex64>) -> Result<ArrayD<f64>> {
    let (axis, n) = last_axis(cplx.shape(), "combine_block_from_complex")?;
    let mut out = ArrayD::<f64>::zeros(with_last_len(cplx.shape(), 2 * n));

    Zip::from(out.lanes_mut(axis))
        .and(cplx.lanes(axis))
        .for_each(|mut dst, src| {
            for k in 0..n {
                dst[k] = src[k].re;
                dst[k + n] = src[k].im;
            }
        });
    Ok(out)
}

/// `(r0, i0, r1, i1, ...)` → `(r0, r1, ..., i0, i1, ...)` along the last axis.
pub fn interleave_single_to_block(real: &ArrayD<f64>) -> Result<ArrayD<f64>> {
    let (axis, n) = paired_axis(real.shape(), "interleave_single_to_block")?;
    let mut out = ArrayD::<f64>::zeros(real.raw_dim());

    Zip::from(out.lanes_mut(axis))
        .and(real.lanes(axis))
        .for_each(|mut dst, src| {
            for k in 0..n {
                dst[k] = src[2 * k];
                dst[k + n] = src[2 * k + 1];
            }
        });
    Ok(out)
}

/// `(r0, r1, ..., i0, i1, ...)` → `(r0, i0, r1, i1, ...)` along the last axis.
pub fn interleave_block_to_single(real: &ArrayD<f64>) -> Result<ArrayD<f64>> {
    let (axis, n) = paired_axis(real.shape(), "interleave_block_to_single")?;
    let mut out = ArrayD::<f64>::zeros(real.raw_dim());

    Zip::from(out.lanes_mut(axis))
        .and(real.lanes(axis))
        .for_each(|mut dst, src| {
            for k in 0..n {
                dst[2 * k] = src[k];
                dst[2 * k + 1] = src[k + n];
            }
        });
    Ok(out)
}

/// `[..., 2N]` single-interleaved reals → `[..., N]` complex.
pub fn split_single_to_complex(real: &ArrayD<f64>) -> Result<ArrayD<Complex64>> {
    split_block_to_complex(&interleave_single_to_block(real)?)
}

/// `[..., N]` complex → `[..., 2N]` single-interleaved reals.
pub fn combine_single_from_complex(cplx: &ArrayD<Complex64>) -> Result<ArrayD<f64>> {
    interleave_block_to_single(&combine_block_from_complex(cplx)?)
}

/// Encode a complex tensor into the real-valued storage described by
/// `layout`. `dim` is only used for error reporting.
pub fn encode(layout: Layout, cplx: &ArrayD<Complex64>, dim: usize) -> Result<ArrayD<f64>> {
    match layout {
        Layout::BlockInterleave => combine_block_from_complex(cplx),
        Layout::SingleInterleave => combine_single_from_complex(cplx),
        Layout::Real | Layout::Complex => Err(SpectrumError::unsupported_layout(
            layout,
            dim,
            "no real-valued encoding for complex samples",
        )),
    }
}

/// Decode real-valued storage described by `layout` into complex samples.
pub fn decode(layout: Layout, real: &ArrayD<f64>, dim: usize) -> Result<ArrayD<Complex64>> {
    match layout {
        Layout::BlockInterleave => split_block_to_complex(real),
        Layout::SingleInterleave => split_single_to_complex(real),
        Layout::Real | Layout::Complex => Err(SpectrumError::unsupported_layout(
            layout,
            dim,
            "storage does not encode complex pairs",
        )),
    }
}
