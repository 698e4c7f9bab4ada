//! Fourier transform along the innermost axis of a complex tensor.
//!
//! Forward and inverse directions are kept symmetric so that
//! `inverse(forward(x)) == x` up to rounding:
//!
//! ```text
//!   forward:  FFT (unnormalized)  →  fftshift  (zero frequency to the centre)
//!   inverse:  ifftshift           →  IFFT      →  divide by N
//! ```

use ndarray::{ArrayD, Axis};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftDirection {
    Forward,
    Inverse,
}

/// Rotate so the zero-frequency bin moves from index 0 to index `n / 2`.
pub fn fftshift(buf: &mut [Complex64]) {
    let half = buf.len() / 2;
    buf.rotate_right(half);
}

/// Undo [`fftshift`], also for odd lengths.
pub fn ifftshift(buf: &mut [Complex64]) {
    let half = buf.len() / 2;
    buf.rotate_left(half);
}

/// A planned FFT for one innermost-axis length.
///
/// Holds the plan and scratch size so every lane of a tensor is transformed
/// without re-planning.
pub struct LastAxisFft {
    size: usize,
    direction: FftDirection,
    plan: Arc<dyn Fft<f64>>,
}

impl LastAxisFft {
    pub fn new(size: usize, direction: FftDirection) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let plan = match direction {
            FftDirection::Forward => planner.plan_fft_forward(size),
            FftDirection::Inverse => planner.plan_fft_inverse(size),
        };
        Self {
            size,
            direction,
            plan,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform one vector in place.
    pub fn process_vector(&self, buf: &mut [Complex64], scratch: &mut [Complex64]) {
        debug_assert_eq!(buf.len(), self.size);
        match self.direction {
            FftDirection::Forward => {
                self.plan.process_with_scratch(buf, scratch);
                fftshift(buf);
            }
            FftDirection::Inverse => {
                ifftshift(buf);
                self.plan.process_with_scratch(buf, scratch);
                let inv_n = 1.0 / self.size as f64;
                for z in buf.iter_mut() {
                    *z *= inv_n;
                }
            }
        }
    }

    /// Transform every lane along the last axis of `data` in place.
    ///
    /// Panics in debug builds if the last axis length differs from the
    /// planned size; callers plan from the tensor they pass in.
    pub fn process(&self, data: &mut ArrayD<Complex64>) {
        if self.size == 0 || data.ndim() == 0 {
            return;
        }
        let axis = Axis(data.ndim() - 1);
        debug_assert_eq!(data.len_of(axis), self.size);
        let mut buf = vec![Complex64::new(0.0, 0.0); self.size];
        let mut scratch = vec![Complex64::new(0.0, 0.0); self.plan.get_inplace_scratch_len()];

        let mut lanes = 0usize;
        for mut lane in data.lanes_mut(axis) {
            for (dst, src) in buf.iter_mut().zip(lane.iter()) {
                *dst = *src;
            }
            self.process_vector(&mut buf, &mut scratch);
            for (dst, src) in lane.iter_mut().zip(buf.iter()) {
                *dst = *src;
            }
            lanes += 1;
        }
        log::debug!(
            "{:?} FFT of {} points applied to {} vectors",
            self.direction,
            self.size,
            lanes
        );
    }
}

/// Plan and apply a transform sized from the tensor's last axis.
pub fn transform_last_axis(data: &mut ArrayD<Complex64>, direction: FftDirection) {
    let size = data.shape().last().copied().unwrap_or(0);
    if size == 0 {
        return;
    }
    LastAxisFft::new(size, direction).process(data);
}
