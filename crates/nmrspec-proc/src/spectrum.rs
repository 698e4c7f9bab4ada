//! The spectrum interface.
//!
//! [`SpectrumCore`] holds the tensor and per-dimension records that every
//! format shares. [`NmrSpectrum`] is the interface each format implements:
//! it only has to provide access to its core and answer
//! [`NmrSpectrum::data_layout`]. Transpose, phase correction and Fourier
//! transform are written once as provided methods on top of that.

use std::path::PathBuf;

use nmrspec_codec::SpectrumTensor;
use nmrspec_core::*;

use crate::ft::FtFlags;

// ─── Reset attributes ───────────────────────────────────────────────────────

/// Attributes cleared by [`NmrSpectrum::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResetAttr {
    Data,
    InFilepath,
    OutFilepath,
}

/// Attributes cleared when `reset` is called without an explicit list.
pub const DEFAULT_RESET_ATTRS: [ResetAttr; 3] =
    [ResetAttr::Data, ResetAttr::InFilepath, ResetAttr::OutFilepath];

// ─── Core state ─────────────────────────────────────────────────────────────

/// Tensor, per-dimension parameters and collaborator state of one spectrum.
///
/// The number of dimension records is fixed at construction; records can be
/// edited in place but never added or removed.
#[derive(Debug, Clone)]
pub struct SpectrumCore {
    data: Option<SpectrumTensor>,
    dims: Vec<DimParams>,
    /// Format-specific metadata owned by the loader/saver.
    pub meta: Meta,
    pub in_filepath: Option<PathBuf>,
    pub out_filepath: Option<PathBuf>,
}

impl SpectrumCore {
    /// Build a core from a loaded tensor and its dimension records.
    ///
    /// The tensor rank must equal the number of records.
    pub fn new(data: SpectrumTensor, dims: Vec<DimParams>) -> Result<Self> {
        if dims.is_empty() {
            return Err(SpectrumError::Shape(
                "a spectrum needs at least one dimension".into(),
            ));
        }
        check_rank(&data, dims.len())?;
        Ok(Self {
            data: Some(data),
            dims,
            meta: Meta::new(),
            in_filepath: None,
            out_filepath: None,
        })
    }

    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[DimParams] {
        &self.dims
    }

    pub fn dim(&self, dim: usize) -> Result<&DimParams> {
        let ndims = self.ndims();
        self.dims.get(dim).ok_or_else(|| out_of_range(dim, ndims))
    }

    pub fn dim_mut(&mut self, dim: usize) -> Result<&mut DimParams> {
        let ndims = self.ndims();
        self.dims.get_mut(dim).ok_or_else(|| out_of_range(dim, ndims))
    }

    /// Index of the innermost dimension.
    pub fn last_dim(&self) -> usize {
        self.dims.len() - 1
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Result<&SpectrumTensor> {
        self.data.as_ref().ok_or_else(no_data)
    }

    pub fn data_mut(&mut self) -> Result<&mut SpectrumTensor> {
        self.data.as_mut().ok_or_else(no_data)
    }

    /// Replace the tensor, e.g. when a loader refills a reset spectrum.
    pub fn set_data(&mut self, data: SpectrumTensor) -> Result<()> {
        check_rank(&data, self.ndims())?;
        self.data = Some(data);
        Ok(())
    }

    /// Hand the tensor out, leaving the spectrum without data.
    pub fn take_data(&mut self) -> Result<SpectrumTensor> {
        self.data.take().ok_or_else(no_data)
    }

    /// Consume the core and hand out its tensor, if any.
    pub fn into_data(self) -> Option<SpectrumTensor> {
        self.data
    }

    pub(crate) fn swap_dims(&mut self, a: usize, b: usize) {
        self.dims.swap(a, b);
    }

    /// Clear `meta` and unset the listed attributes.
    pub fn reset(&mut self, attrs: &[ResetAttr]) {
        self.meta.clear();
        for attr in attrs {
            match attr {
                ResetAttr::Data => self.data = None,
                ResetAttr::InFilepath => self.in_filepath = None,
                ResetAttr::OutFilepath => self.out_filepath = None,
            }
        }
    }
}

fn check_rank(data: &SpectrumTensor, ndims: usize) -> Result<()> {
    if data.ndim() != ndims {
        return Err(SpectrumError::Shape(format!(
            "tensor has rank {} but the spectrum has {} dimensions",
            data.ndim(),
            ndims
        )));
    }
    Ok(())
}

fn out_of_range(dim: usize, ndims: usize) -> SpectrumError {
    SpectrumError::Shape(format!(
        "dimension {} out of range for a {}-dimensional spectrum",
        dim, ndims
    ))
}

fn no_data() -> SpectrumError {
    SpectrumError::InvalidOperation("spectrum has no data loaded".into())
}

// ─── Interface ──────────────────────────────────────────────────────────────

/// A multidimensional NMR spectrum in some acquisition/file format.
///
/// Dimension indices are 0-based positions in current data order; the last
/// index is the innermost axis.
pub trait NmrSpectrum {
    fn core(&self) -> &SpectrumCore;

    fn core_mut(&mut self) -> &mut SpectrumCore;

    /// Storage layout used for samples of `data_type` when they sit at
    /// position `dim`. Must agree with how the tensor is actually stored.
    fn data_layout(&self, data_type: DataType, dim: usize) -> Result<Layout>;

    fn ndims(&self) -> usize {
        self.core().ndims()
    }

    /// Original (1-based) dimension numbers in current data order.
    fn order(&self) -> Vec<usize> {
        self.core().dims().iter().map(|d| d.id).collect()
    }

    fn domain_type(&self, dim: usize) -> Result<DomainType> {
        Ok(self.core().dim(dim)?.domain_type)
    }

    fn data_type(&self, dim: usize) -> Result<DataType> {
        Ok(self.core().dim(dim)?.data_type)
    }

    fn sw(&self, dim: usize) -> Result<f64> {
        Ok(self.core().dim(dim)?.sw)
    }

    fn label(&self, dim: usize) -> Result<&str> {
        Ok(self.core().dim(dim)?.label.as_str())
    }

    fn domain_types(&self) -> Vec<DomainType> {
        self.core().dims().iter().map(|d| d.domain_type).collect()
    }

    fn data_types(&self) -> Vec<DataType> {
        self.core().dims().iter().map(|d| d.data_type).collect()
    }

    fn sws(&self) -> Vec<f64> {
        self.core().dims().iter().map(|d| d.sw).collect()
    }

    fn labels(&self) -> Vec<String> {
        self.core().dims().iter().map(|d| d.label.clone()).collect()
    }

    /// Check that the stored tensor matches what `data_layout` reports for
    /// every axis.
    fn validate_layout(&self) -> Result<()> {
        let core = self.core();
        let data = core.data()?;
        let last = core.last_dim();
        for (dim, params) in core.dims().iter().enumerate() {
            let layout = self.data_layout(params.data_type, dim)?;
            let len = data.shape()[dim];
            match (layout, dim == last) {
                (Layout::BlockInterleave | Layout::Complex, true) if params.data_type.is_complex() => {
                    if !data.is_complex() {
                        return Err(SpectrumError::unsupported_layout(
                            layout,
                            dim,
                            "innermost complex dimension is not held as complex samples",
                        ));
                    }
                }
                (Layout::SingleInterleave | Layout::BlockInterleave, false) => {
                    if len % 2 != 0 {
                        return Err(SpectrumError::Shape(format!(
                            "dimension {} is {} but has odd length {}",
                            dim, layout, len
                        )));
                    }
                }
                (Layout::SingleInterleave, true) => {
                    return Err(SpectrumError::unsupported_layout(
                        layout,
                        dim,
                        "the innermost axis cannot be single interleaved",
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Exchange dimensions `dim0` and `dim1`, re-encoding complex storage
    /// when the innermost axis is involved.
    fn transpose(&mut self, dim0: usize, dim1: usize, interleave_complex: bool) -> Result<()> {
        crate::transpose::transpose(self, dim0, dim1, interleave_complex)
    }

    /// Apply `exp(i * (p0 + p1 * f))` along the innermost axis.
    fn phase(&mut self, p0: f64, p1: f64, discard_imaginaries: bool) -> Result<()> {
        crate::phase::phase(self, p0, p1, discard_imaginaries)
    }

    /// Fourier transform the innermost axis.
    fn ft(&mut self, flags: &FtFlags) -> Result<()> {
        crate::ft::ft(self, flags)
    }

    /// Clear metadata and unset `attrs` (by default data and both paths)
    /// before re-loading.
    fn reset(&mut self, attrs: Option<&[ResetAttr]>) {
        let attrs = attrs.unwrap_or(&DEFAULT_RESET_ATTRS);
        log::debug!("resetting spectrum attributes {:?}", attrs);
        self.core_mut().reset(attrs);
    }
}
