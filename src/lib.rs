//! nmrspec: multidimensional NMR spectra with layout-aware transpose,
//! Fourier transform and phase correction.
//!
//! ```no_run
//! use nmrspec::prelude::*;
//!
//! # fn main() -> nmrspec::Result<()> {
//! nmrspec::init_logging();
//! let data = SpectrumTensor::complex_from_vec(&[4, 2], vec![Complex64::new(1.0, 0.0); 8])?;
//! let mut spec = PipeSpectrum::new(
//!     data,
//!     vec![
//!         DimParams::complex_fid(2, 2000.0, "15N"),
//!         DimParams::complex_fid(1, 8000.0, "1H"),
//!     ],
//! )?;
//! spec.ft_and_update(&FtFlags::forward())?;
//! spec.transpose(0, 1, true)?;
//! # Ok(())
//! # }
//! ```

pub use nmrspec_codec;
pub use nmrspec_core;
pub use nmrspec_proc;

pub use nmrspec_core::{Result, SpectrumError};

pub mod prelude {
    pub use nmrspec_codec::SpectrumTensor;
    pub use nmrspec_core::*;
    pub use nmrspec_proc::*;
    pub use num_complex::Complex64;
}

/// Initialise `env_logger` at `info` level unless `RUST_LOG` says otherwise.
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
    log::debug!("nmrspec v{} logging ready", env!("CARGO_PKG_VERSION"));
}
