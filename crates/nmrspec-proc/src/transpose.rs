//! Dimension exchange with storage re-encoding.
//!
//! Only the innermost axis may hold complex data in block-interleaved form
//! (decoded in memory as complex samples); every other complex axis is single
//! interleaved. A complex dimension that leaves the innermost position is
//! re-encoded to the layout of its new position, and one that arrives there
//! is decoded back to complex samples:
//!
//! ```text
//!   leaving   complex[.., N] → block[.., 2N] → single[.., 2N] → swap
//!   arriving  swap → single[.., 2N] → block[.., 2N] → complex[.., N]
//! ```
//!
//! All checks run before anything is touched, so a failed transpose leaves the
//! spectrum as it was.

use nmrspec_codec::*;
use nmrspec_core::*;

use crate::spectrum::NmrSpectrum;

/// Layout of each axis before the swap and at the position it moves to.
struct SwapPlan {
    dim0: usize,
    dim1: usize,
    type0: DataType,
    type1: DataType,
    /// Axis at `dim0`: layout now, layout once at `dim1`.
    cur0: Layout,
    next0: Layout,
    /// Axis at `dim1`: layout now, layout once at `dim0`.
    cur1: Layout,
    next1: Layout,
}

impl SwapPlan {
    fn new<S: NmrSpectrum + ?Sized>(spec: &S, dim0: usize, dim1: usize) -> Result<Self> {
        let type0 = spec.data_type(dim0)?;
        let type1 = spec.data_type(dim1)?;
        Ok(Self {
            dim0,
            dim1,
            type0,
            type1,
            cur0: spec.data_layout(type0, dim0)?,
            next0: spec.data_layout(type0, dim1)?,
            cur1: spec.data_layout(type1, dim1)?,
            next1: spec.data_layout(type1, dim0)?,
        })
    }

    /// The complex axis at `dim1` must be decoded before the swap.
    fn leaves_innermost(&self) -> bool {
        self.type1.is_complex()
    }

    /// The complex axis at `dim0` must be decoded after the swap.
    fn enters_innermost(&self) -> bool {
        self.type0.is_complex()
    }
}

/// Exchange dimensions `dim0` and `dim1` of `spec`.
///
/// With `interleave_complex` set, complex storage is re-encoded whenever the
/// innermost dimension takes part in the swap. Without it only the axes and
/// dimension records are exchanged.
pub fn transpose<S: NmrSpectrum + ?Sized>(
    spec: &mut S,
    dim0: usize,
    dim1: usize,
    interleave_complex: bool,
) -> Result<()> {
    let ndims = spec.ndims();
    if ndims <= 1 {
        return Err(SpectrumError::InvalidOperation(format!(
            "cannot transpose a {}-dimensional spectrum",
            ndims
        )));
    }
    for dim in [dim0, dim1] {
        if dim >= ndims {
            return Err(SpectrumError::Shape(format!(
                "transpose dimension {} out of range for {} dimensions",
                dim, ndims
            )));
        }
    }
    if dim0 == dim1 {
        log::warn!("transpose of dimension {} with itself ignored", dim0);
        return Ok(());
    }
    let (dim0, dim1) = if dim0 < dim1 { (dim0, dim1) } else { (dim1, dim0) };

    let plan = SwapPlan::new(&*spec, dim0, dim1)?;
    let innermost = interleave_complex && dim1 == ndims - 1;

    if interleave_complex {
        check_plan(&plan, innermost, spec.core().data()?)?;
    }

    let core = spec.core_mut();
    let data = core.take_data()?;
    let result = if innermost {
        swap_innermost(&plan, data)
    } else {
        let mut data = data;
        data.swap_axes(dim0, dim1);
        Ok(data)
    };

    match result {
        Ok(data) => {
            core.set_data(data)?;
            core.swap_dims(dim0, dim1);
            log::debug!(
                "transposed dimensions {} <-> {} (order now {:?})",
                dim0,
                dim1,
                spec.order()
            );
            Ok(())
        }
        Err((data, err)) => {
            core.set_data(data)?;
            Err(err)
        }
    }
}

/// Reject every layout combination the swap cannot re-encode.
fn check_plan(plan: &SwapPlan, innermost: bool, data: &SpectrumTensor) -> Result<()> {
    if !innermost {
        // Away from the innermost axis layouts must not depend on position.
        if plan.cur0 != plan.next0 {
            return Err(SpectrumError::unsupported_layout(
                plan.cur0,
                plan.dim0,
                format!("would change to {} at dimension {}", plan.next0, plan.dim1),
            ));
        }
        if plan.cur1 != plan.next1 {
            return Err(SpectrumError::unsupported_layout(
                plan.cur1,
                plan.dim1,
                format!("would change to {} at dimension {}", plan.next1, plan.dim0),
            ));
        }
        return Ok(());
    }

    if plan.leaves_innermost() {
        if plan.cur1 != Layout::BlockInterleave {
            return Err(SpectrumError::unsupported_layout(
                plan.cur1,
                plan.dim1,
                "innermost complex dimension must be block interleaved",
            ));
        }
        if !data.is_complex() {
            return Err(SpectrumError::unsupported_layout(
                plan.cur1,
                plan.dim1,
                "innermost complex dimension is not held as complex samples",
            ));
        }
        if !plan.next1.is_interleaved() {
            return Err(SpectrumError::unsupported_layout(
                plan.next1,
                plan.dim0,
                "complex samples need an interleaved layout",
            ));
        }
    } else if plan.cur1 != plan.next1 {
        return Err(SpectrumError::unsupported_layout(
            plan.cur1,
            plan.dim1,
            format!("would change to {} at dimension {}", plan.next1, plan.dim0),
        ));
    }

    if plan.enters_innermost() {
        if !plan.cur0.is_interleaved() {
            return Err(SpectrumError::unsupported_layout(
                plan.cur0,
                plan.dim0,
                "complex dimension is not interleaved",
            ));
        }
        if plan.next0 != Layout::BlockInterleave {
            return Err(SpectrumError::unsupported_layout(
                plan.next0,
                plan.dim1,
                "innermost complex dimension must be block interleaved",
            ));
        }
        // With nothing leaving the innermost axis the tensor must already be real.
        if !plan.leaves_innermost() && data.is_complex() {
            return Err(SpectrumError::unsupported_layout(
                plan.cur0,
                plan.dim0,
                "interleaved dimension found in a complex tensor",
            ));
        }
        let len = data.shape()[plan.dim0];
        if len % 2 != 0 {
            return Err(SpectrumError::Shape(format!(
                "complex dimension {} has odd length {}",
                plan.dim0, len
            )));
        }
    } else if plan.cur0 != plan.next0 {
        return Err(SpectrumError::unsupported_layout(
            plan.cur0,
            plan.dim0,
            format!("would change to {} at dimension {}", plan.next0, plan.dim1),
        ));
    }
    Ok(())
}

/// Swap with the innermost axis, re-encoding complex storage on the way out
/// and on the way in. On error the tensor comes back unchanged.
fn swap_innermost(
    plan: &SwapPlan,
    data: SpectrumTensor,
) -> std::result::Result<SpectrumTensor, (SpectrumTensor, SpectrumError)> {
    let (mut staged, original) = match encode_leaving(plan, &data) {
        Ok(Some(real)) => (SpectrumTensor::Real(real), Some(data)),
        Ok(None) => (data, None),
        Err(err) => return Err((data, err)),
    };

    staged.swap_axes(plan.dim0, plan.dim1);

    match decode_arriving(plan, &staged) {
        Ok(Some(cplx)) => Ok(SpectrumTensor::Complex(cplx)),
        Ok(None) => Ok(staged),
        Err(err) => match original {
            Some(data) => Err((data, err)),
            None => {
                staged.swap_axes(plan.dim0, plan.dim1);
                Err((staged, err))
            }
        },
    }
}

fn encode_leaving(
    plan: &SwapPlan,
    data: &SpectrumTensor,
) -> Result<Option<ndarray::ArrayD<f64>>> {
    if !plan.leaves_innermost() {
        return Ok(None);
    }
    let SpectrumTensor::Complex(cplx) = data else {
        return Err(SpectrumError::unsupported_layout(
            plan.cur1,
            plan.dim1,
            "innermost complex dimension is not held as complex samples",
        ));
    };
    log::debug!(
        "dimension {} leaves the innermost axis: complex -> {}",
        plan.dim1,
        plan.next1
    );
    encode(plan.next1, cplx, plan.dim0).map(Some)
}

fn decode_arriving(
    plan: &SwapPlan,
    staged: &SpectrumTensor,
) -> Result<Option<ndarray::ArrayD<num_complex::Complex64>>> {
    if !plan.enters_innermost() {
        return Ok(None);
    }
    let SpectrumTensor::Real(real) = staged else {
        return Err(SpectrumError::unsupported_layout(
            plan.cur0,
            plan.dim1,
            "interleaved dimension found in a complex tensor",
        ));
    };
    log::debug!(
        "dimension {} enters the innermost axis: {} -> complex",
        plan.dim0,
        plan.cur0
    );
    decode(plan.cur0, real, plan.dim1).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{LayoutTable, PipeSpectrum, TableSpectrum};
    use ndarray::{ArrayD, IxDyn};
    use num_complex::Complex64;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// 2D hypercomplex FID: Y is single interleaved (2 * ny rows), X complex.
    fn hypercomplex(ny: usize, nx: usize) -> PipeSpectrum {
        let data = ArrayD::from_shape_fn(IxDyn(&[2 * ny, nx]), |idx| {
            Complex64::new(
                (idx[0] * 10 + idx[1]) as f64 + 0.25,
                -((idx[0] * 7 + idx[1] * 3) as f64) * 0.5,
            )
        });
        PipeSpectrum::new(
            SpectrumTensor::Complex(data),
            vec![
                DimParams::new(2, DomainType::Time, DataType::Complex, 2000.0, "15N"),
                DimParams::new(1, DomainType::Freq, DataType::Complex, 8000.0, "1H"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_transpose_1d_is_invalid() {
        let data = SpectrumTensor::complex_from_vec(&[4], vec![Complex64::new(1.0, 0.0); 4]).unwrap();
        let mut spec =
            PipeSpectrum::new(data, vec![DimParams::complex_fid(1, 1000.0, "1H")]).unwrap();
        assert!(matches!(
            spec.transpose(0, 0, true),
            Err(SpectrumError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_transpose_out_of_range() {
        let mut spec = hypercomplex(2, 3);
        assert!(matches!(
            spec.transpose(0, 2, true),
            Err(SpectrumError::Shape(_))
        ));
    }

    #[test]
    fn test_hypercomplex_shapes_and_metadata() {
        init_logs();
        let mut spec = hypercomplex(2, 3);
        spec.transpose(0, 1, true).unwrap();

        let data = spec.core().data().unwrap();
        assert!(data.is_complex());
        // X (3 complex) becomes 6 interleaved rows, Y (4 interleaved) becomes 2 complex.
        assert_eq!(data.shape(), &[6, 2]);
        assert_eq!(spec.order(), vec![1, 2]);
        assert_eq!(spec.labels(), vec!["1H".to_string(), "15N".to_string()]);
        assert_eq!(spec.sws(), vec![8000.0, 2000.0]);
        assert_eq!(
            spec.domain_types(),
            vec![DomainType::Freq, DomainType::Time]
        );
        spec.validate_layout().unwrap();
    }

    #[test]
    fn test_hypercomplex_values_follow_layouts() {
        let mut spec = hypercomplex(2, 3);
        let before = match spec.core().data().unwrap() {
            SpectrumTensor::Complex(a) => a.clone(),
            _ => unreachable!(),
        };
        spec.transpose(1, 0, true).unwrap();
        let after = match spec.core().data().unwrap() {
            SpectrumTensor::Complex(a) => a.clone(),
            _ => panic!("expected complex data"),
        };
        // after[2x + p, y] pairs the y-th real/imag rows of the original at column x,
        // taking the real (p = 0) or imaginary (p = 1) part of the X samples.
        for y in 0..2 {
            for x in 0..3 {
                let re_row = before[[2 * y, x]];
                let im_row = before[[2 * y + 1, x]];
                assert_eq!(after[[2 * x, y]], Complex64::new(re_row.re, im_row.re));
                assert_eq!(after[[2 * x + 1, y]], Complex64::new(re_row.im, im_row.im));
            }
        }
    }

    #[test]
    fn test_transpose_twice_restores() {
        let mut spec = hypercomplex(3, 4);
        let data0 = spec.core().data().unwrap().clone();
        let dims0 = spec.core().dims().to_vec();

        spec.transpose(0, 1, true).unwrap();
        assert_ne!(spec.core().data().unwrap(), &data0);
        spec.transpose(0, 1, true).unwrap();

        assert_eq!(spec.core().data().unwrap(), &data0);
        assert_eq!(spec.core().dims(), dims0.as_slice());
    }

    #[test]
    fn test_complex_innermost_leaves_as_single_interleave() {
        // Real Y dimension, complex X: after the swap X is 2N interleaved reals.
        let nx = 4;
        let cplx = ArrayD::from_shape_fn(IxDyn(&[3, nx]), |idx| {
            Complex64::new(idx[1] as f64 + 1.0, -(idx[0] as f64) - 0.5)
        });
        let mut spec = PipeSpectrum::new(
            SpectrumTensor::Complex(cplx.clone()),
            vec![
                DimParams::new(2, DomainType::Time, DataType::Real, 500.0, "13C"),
                DimParams::complex_fid(1, 6000.0, "1H"),
            ],
        )
        .unwrap();

        spec.transpose(0, 1, true).unwrap();

        let block = combine_block_from_complex(&cplx).unwrap();
        let expected = interleave_block_to_single(&block).unwrap();
        let expected = expected.t().as_standard_layout().into_owned();
        match spec.core().data().unwrap() {
            SpectrumTensor::Real(a) => {
                assert_eq!(a.shape(), &[2 * nx, 3]);
                assert_eq!(a, &expected);
            }
            _ => panic!("expected real data"),
        }
        assert_eq!(spec.data_types(), vec![DataType::Complex, DataType::Real]);
        spec.validate_layout().unwrap();

        spec.transpose(0, 1, true).unwrap();
        assert_eq!(spec.core().data().unwrap(), &SpectrumTensor::Complex(cplx));
    }

    #[test]
    fn test_three_dims_outer_swap_is_plain() {
        let data = ArrayD::from_shape_fn(IxDyn(&[2, 4, 3]), |idx| {
            Complex64::new((idx[0] * 100 + idx[1] * 10 + idx[2]) as f64, 0.0)
        });
        let mut spec = PipeSpectrum::new(
            SpectrumTensor::Complex(data.clone()),
            vec![
                DimParams::new(3, DomainType::Time, DataType::Complex, 1500.0, "13C"),
                DimParams::new(2, DomainType::Time, DataType::Complex, 2000.0, "15N"),
                DimParams::complex_fid(1, 8000.0, "1H"),
            ],
        )
        .unwrap();
        spec.transpose(1, 0, true).unwrap();
        assert_eq!(spec.order(), vec![2, 3, 1]);
        match spec.core().data().unwrap() {
            SpectrumTensor::Complex(a) => {
                assert_eq!(a.shape(), &[4, 2, 3]);
                assert_eq!(a[[3, 1, 2]], data[[1, 3, 2]]);
            }
            _ => panic!("expected complex data"),
        }
    }

    #[test]
    fn test_non_innermost_layout_change_is_unsupported() {
        let table = LayoutTable::new()
            .with(DataType::Real, 0, Layout::Real)
            .with(DataType::Real, 1, Layout::Real)
            .with(DataType::Real, 2, Layout::Real)
            .with(DataType::Complex, 0, Layout::SingleInterleave)
            .with(DataType::Complex, 1, Layout::BlockInterleave)
            .with(DataType::Complex, 2, Layout::BlockInterleave);
        let data = ArrayD::<Complex64>::zeros(IxDyn(&[4, 4, 2]));
        let mut spec = TableSpectrum::new(
            SpectrumTensor::Complex(data),
            vec![
                DimParams::new(3, DomainType::Time, DataType::Complex, 1.0, "c"),
                DimParams::new(2, DomainType::Time, DataType::Complex, 1.0, "b"),
                DimParams::complex_fid(1, 1.0, "a"),
            ],
            table,
        )
        .unwrap();
        let err = spec.transpose(0, 1, true).unwrap_err();
        assert!(matches!(err, SpectrumError::UnsupportedLayout { dim: 0, .. }));
        assert_eq!(spec.order(), vec![3, 2, 1]);

        // Without re-encoding the caller takes responsibility.
        spec.transpose(0, 1, false).unwrap();
        assert_eq!(spec.order(), vec![2, 3, 1]);
    }

    #[test]
    fn test_innermost_not_block_is_unsupported() {
        let table = LayoutTable::new()
            .with(DataType::Complex, 0, Layout::SingleInterleave)
            .with(DataType::Complex, 1, Layout::Complex);
        let data = ArrayD::<Complex64>::zeros(IxDyn(&[2, 2]));
        let mut spec = TableSpectrum::new(
            SpectrumTensor::Complex(data.clone()),
            vec![
                DimParams::complex_fid(2, 1.0, "b"),
                DimParams::complex_fid(1, 1.0, "a"),
            ],
            table,
        )
        .unwrap();
        let err = spec.transpose(0, 1, true).unwrap_err();
        assert!(matches!(
            err,
            SpectrumError::UnsupportedLayout {
                layout: Layout::Complex,
                dim: 1,
                ..
            }
        ));
        assert_eq!(spec.core().data().unwrap(), &SpectrumTensor::Complex(data));
    }

    #[test]
    fn test_odd_interleaved_length_leaves_data_untouched() {
        let data = ArrayD::from_shape_fn(IxDyn(&[3, 2]), |idx| {
            Complex64::new(idx[0] as f64, idx[1] as f64)
        });
        let dims = vec![
            DimParams::new(2, DomainType::Time, DataType::Complex, 1.0, "b"),
            DimParams::complex_fid(1, 1.0, "a"),
        ];
        // Construction already rejects odd interleaved axes.
        assert!(matches!(
            PipeSpectrum::new(SpectrumTensor::Complex(data.clone()), dims),
            Err(SpectrumError::Shape(_))
        ));

        // A real Y dimension relabelled complex after loading.
        let mut spec = PipeSpectrum::new(
            SpectrumTensor::Complex(data.clone()),
            vec![
                DimParams::new(2, DomainType::Time, DataType::Real, 1.0, "b"),
                DimParams::complex_fid(1, 1.0, "a"),
            ],
        )
        .unwrap();
        spec.core_mut().dim_mut(0).unwrap().data_type = DataType::Complex;
        assert!(matches!(
            spec.transpose(0, 1, true),
            Err(SpectrumError::Shape(_))
        ));
        assert_eq!(spec.core().data().unwrap(), &SpectrumTensor::Complex(data));
        assert_eq!(spec.order(), vec![2, 1]);
    }
}
