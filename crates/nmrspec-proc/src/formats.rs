//! Concrete spectrum formats.
//!
//! [`PipeSpectrum`] follows the NMRPipe storage convention: the innermost
//! complex dimension is block interleaved and every other complex dimension
//! is single interleaved. [`TableSpectrum`] answers layouts from an explicit
//! [`LayoutTable`], for data whose layouts are known up front.

use std::collections::HashMap;

use nmrspec_codec::SpectrumTensor;
use nmrspec_core::*;

use crate::ft::FtFlags;
use crate::spectrum::{NmrSpectrum, SpectrumCore};

fn check_dim<S: NmrSpectrum + ?Sized>(spec: &S, dim: usize) -> Result<()> {
    if dim >= spec.ndims() {
        return Err(SpectrumError::Shape(format!(
            "dimension {} out of range for a {}-dimensional spectrum",
            dim,
            spec.ndims()
        )));
    }
    Ok(())
}

// =========================================================================
//  NMRPipe convention
// =========================================================================

#[derive(Debug, Clone)]
pub struct PipeSpectrum {
    core: SpectrumCore,
}

impl PipeSpectrum {
    /// Wrap loaded data, checking every axis against the NMRPipe layouts.
    pub fn new(data: SpectrumTensor, dims: Vec<DimParams>) -> Result<Self> {
        let spec = Self {
            core: SpectrumCore::new(data, dims)?,
        };
        spec.validate_layout()?;
        Ok(spec)
    }

    /// Fourier transform the innermost axis and flip its domain type.
    pub fn ft_and_update(&mut self, flags: &FtFlags) -> Result<()> {
        self.ft(flags)?;
        let last = self.core.last_dim();
        let params = self.core.dim_mut(last)?;
        params.domain_type = params.domain_type.flipped();
        log::debug!(
            "dimension {} is now in the {} domain",
            last,
            params.domain_type
        );
        Ok(())
    }

    pub fn into_core(self) -> SpectrumCore {
        self.core
    }
}

impl NmrSpectrum for PipeSpectrum {
    fn core(&self) -> &SpectrumCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SpectrumCore {
        &mut self.core
    }

    fn data_layout(&self, data_type: DataType, dim: usize) -> Result<Layout> {
        check_dim(self, dim)?;
        Ok(match data_type {
            DataType::Complex if dim == self.core.last_dim() => Layout::BlockInterleave,
            DataType::Complex => Layout::SingleInterleave,
            DataType::Real | DataType::Imag => Layout::Real,
        })
    }
}

// =========================================================================
//  Explicit layout table
// =========================================================================

/// Layout for each `(data type, position)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutTable {
    entries: HashMap<(DataType, usize), Layout>,
}

impl LayoutTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, data_type: DataType, dim: usize, layout: Layout) -> Self {
        self.insert(data_type, dim, layout);
        self
    }

    pub fn insert(&mut self, data_type: DataType, dim: usize, layout: Layout) {
        self.entries.insert((data_type, dim), layout);
    }

    pub fn get(&self, data_type: DataType, dim: usize) -> Option<Layout> {
        self.entries.get(&(data_type, dim)).copied()
    }

    /// The NMRPipe layouts for an `ndims`-dimensional spectrum.
    pub fn pipe_convention(ndims: usize) -> Self {
        let mut table = Self::new();
        for dim in 0..ndims {
            let complex = if dim + 1 == ndims {
                Layout::BlockInterleave
            } else {
                Layout::SingleInterleave
            };
            table.insert(DataType::Complex, dim, complex);
            table.insert(DataType::Real, dim, Layout::Real);
            table.insert(DataType::Imag, dim, Layout::Real);
        }
        table
    }
}

#[derive(Debug, Clone)]
pub struct TableSpectrum {
    core: SpectrumCore,
    table: LayoutTable,
}

impl TableSpectrum {
    pub fn new(data: SpectrumTensor, dims: Vec<DimParams>, table: LayoutTable) -> Result<Self> {
        let spec = Self {
            core: SpectrumCore::new(data, dims)?,
            table,
        };
        spec.validate_layout()?;
        Ok(spec)
    }

    pub fn table(&self) -> &LayoutTable {
        &self.table
    }
}

impl NmrSpectrum for TableSpectrum {
    fn core(&self) -> &SpectrumCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SpectrumCore {
        &mut self.core
    }

    fn data_layout(&self, data_type: DataType, dim: usize) -> Result<Layout> {
        check_dim(self, dim)?;
        self.table.get(data_type, dim).ok_or_else(|| {
            SpectrumError::InvalidOperation(format!(
                "no layout recorded for {} data at dimension {}",
                data_type, dim
            ))
        })
    }
}
