//! Per-dimension parameter record.
//!
//! One record per dimension keeps domain type, data type, spectral width and
//! label together so they cannot drift out of length-sync.

use crate::enums::{DataType, DomainType};
use serde::{Deserialize, Serialize};

/// Parameters of one spectrum dimension, in current data order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimParams {
    /// 1-based dimension number assigned at load time; follows the
    /// dimension through transposes.
    pub id: usize,
    pub domain_type: DomainType,
    pub data_type: DataType,
    /// Spectral width in Hz.
    pub sw: f64,
    pub label: String,
}

impl DimParams {
    pub fn new(
        id: usize,
        domain_type: DomainType,
        data_type: DataType,
        sw: f64,
        label: &str,
    ) -> Self {
        Self {
            id,
            domain_type,
            data_type,
            sw,
            label: label.to_string(),
        }
    }

    /// A complex time-domain dimension, the usual state right after
    /// acquisition.
    pub fn complex_fid(id: usize, sw: f64, label: &str) -> Self {
        Self::new(id, DomainType::Time, DataType::Complex, sw, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_fid() {
        let d = DimParams::complex_fid(1, 8000.0, "1H");
        assert_eq!(d.domain_type, DomainType::Time);
        assert_eq!(d.data_type, DataType::Complex);
        assert_eq!(d.label, "1H");
    }
}
