//! Spectrum sample storage: an N-dimensional array of either real or complex
//! values.

use ndarray::{ArrayD, IxDyn};
use nmrspec_core::{Result, SpectrumError};
use num_complex::Complex64;

/// The data tensor of a spectrum.
///
/// The innermost (last) axis of a complex dimension is held decoded as
/// `Complex` samples; every other complex axis keeps its real/imaginary
/// pairs interleaved along the axis itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrumTensor {
    Real(ArrayD<f64>),
    Complex(ArrayD<Complex64>),
}

impl SpectrumTensor {
    /// Build a real tensor from a flat row-major buffer.
    pub fn real_from_vec(shape: &[usize], values: Vec<f64>) -> Result<Self> {
        ArrayD::from_shape_vec(IxDyn(shape), values)
            .map(Self::Real)
            .map_err(|e| SpectrumError::Shape(format!("{:?}: {}", shape, e)))
    }

    /// Build a complex tensor from a flat row-major buffer.
    pub fn complex_from_vec(shape: &[usize], values: Vec<Complex64>) -> Result<Self> {
        ArrayD::from_shape_vec(IxDyn(shape), values)
            .map(Self::Complex)
            .map_err(|e| SpectrumError::Shape(format!("{:?}: {}", shape, e)))
    }

    pub fn ndim(&self) -> usize {
        match self {
            Self::Real(a) => a.ndim(),
            Self::Complex(a) => a.ndim(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Real(a) => a.shape(),
            Self::Complex(a) => a.shape(),
        }
    }

    /// Length of the innermost axis, `None` for a rank-0 tensor.
    pub fn last_len(&self) -> Option<usize> {
        self.shape().last().copied()
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Real(_) => "real",
            Self::Complex(_) => "complex",
        }
    }

    /// Promote to complex samples; real values get a zero imaginary part.
    pub fn into_complex(self) -> ArrayD<Complex64> {
        match self {
            Self::Real(a) => a.mapv(|v| Complex64::new(v, 0.0)),
            Self::Complex(a) => a,
        }
    }

    /// Real component of every sample.
    pub fn real_part(&self) -> ArrayD<f64> {
        match self {
            Self::Real(a) => a.clone(),
            Self::Complex(a) => a.mapv(|c| c.re),
        }
    }

    /// Exchange two axes. The result is re-packed in standard (row-major)
    /// order so later lane iteration sees contiguous data.
    pub fn swap_axes(&mut self, a: usize, b: usize) {
        match self {
            Self::Real(arr) => {
                arr.swap_axes(a, b);
                let packed = arr.as_standard_layout().into_owned();
                *arr = packed;
            }
            Self::Complex(arr) => {
                arr.swap_axes(a, b);
                let packed = arr.as_standard_layout().into_owned();
                *arr = packed;
            }
        }
    }
}

impl From<ArrayD<f64>> for SpectrumTensor {
    fn from(a: ArrayD<f64>) -> Self {
        Self::Real(a)
    }
}

impl From<ArrayD<Complex64>> for SpectrumTensor {
    fn from(a: ArrayD<Complex64>) -> Self {
        Self::Complex(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_shape_mismatch() {
        assert!(SpectrumTensor::real_from_vec(&[2, 3], vec![0.0; 5]).is_err());
        let t = SpectrumTensor::real_from_vec(&[2, 3], vec![0.0; 6]).unwrap();
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.last_len(), Some(3));
        assert_eq!(t.kind(), "real");
    }

    #[test]
    fn test_swap_axes_repacks() {
        let mut t =
            SpectrumTensor::real_from_vec(&[2, 3], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        t.swap_axes(0, 1);
        match &t {
            SpectrumTensor::Real(a) => {
                assert_eq!(a.shape(), &[3, 2]);
                assert_eq!(a.as_slice().unwrap(), &[0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
            }
            SpectrumTensor::Complex(_) => panic!("dtype changed"),
        }
    }

    #[test]
    fn test_promotion_and_real_part() {
        let t = SpectrumTensor::real_from_vec(&[2], vec![1.5, -2.0]).unwrap();
        let c = t.clone().into_complex();
        assert_eq!(c[[1]], Complex64::new(-2.0, 0.0));
        let back = SpectrumTensor::Complex(c).real_part();
        assert_eq!(back, t.real_part());
    }
}
