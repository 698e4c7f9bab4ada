//! Storage utilities for spectrum tensors: complex layout codec, the
//! real/complex tensor container, and FFT along the innermost axis.

pub mod fft;
pub mod layout;
pub mod tensor;

pub use fft::*;
pub use layout::*;
pub use tensor::*;
