//! Loading and saving seam.
//!
//! File formats live outside this crate; they implement [`SpectrumIo`] on top
//! of their [`NmrSpectrum`] type and can use the helpers here for the
//! bookkeeping every format shares.

use std::io;
use std::path::{Path, PathBuf};

use nmrspec_core::*;

use crate::spectrum::{NmrSpectrum, ResetAttr, DEFAULT_RESET_ATTRS};

pub trait SpectrumIo: NmrSpectrum {
    /// Read data and metadata, replacing whatever the spectrum held.
    /// `None` re-reads the current input path.
    fn load(&mut self, in_filepath: Option<&Path>) -> Result<()>;

    /// Write the spectrum in `format`. `None` writes to the current output
    /// path. Existing files are only replaced with `overwrite`.
    fn save(&self, out_filepath: Option<&Path>, format: SaveFormat, overwrite: bool) -> Result<()>;
}

/// Reset `spec` for a fresh load and record where it comes from.
///
/// Returns the path to read.
pub fn begin_load<S: NmrSpectrum + ?Sized>(
    spec: &mut S,
    in_filepath: Option<&Path>,
) -> Result<PathBuf> {
    let path = match in_filepath {
        Some(p) => p.to_path_buf(),
        None => spec.core().in_filepath.clone().ok_or_else(|| {
            SpectrumError::InvalidOperation("no input file path given".into())
        })?,
    };
    let attrs: Vec<ResetAttr> = DEFAULT_RESET_ATTRS
        .iter()
        .copied()
        .filter(|a| *a != ResetAttr::OutFilepath)
        .collect();
    spec.reset(Some(attrs.as_slice()));
    spec.core_mut().in_filepath = Some(path.clone());
    log::info!("loading spectrum from {}", path.display());
    Ok(path)
}

/// The path a save should write to: the explicit one, else the spectrum's
/// output path.
pub fn target_path<S: NmrSpectrum + ?Sized>(spec: &S, out_filepath: Option<&Path>) -> Result<PathBuf> {
    out_filepath
        .map(Path::to_path_buf)
        .or_else(|| spec.core().out_filepath.clone())
        .ok_or_else(|| SpectrumError::InvalidOperation("no output file path given".into()))
}

/// Refuse to replace an existing file unless `overwrite` is set.
pub fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(already_exists(path));
    }
    Ok(())
}

pub fn already_exists(path: &Path) -> SpectrumError {
    SpectrumError::Io(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} exists and overwrite is not set", path.display()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::SpectrumCore;
    use nmrspec_codec::SpectrumTensor;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    type Store = Rc<RefCell<HashMap<PathBuf, (SaveFormat, SpectrumTensor)>>>;

    /// A 1-D real spectrum backed by an in-memory file table.
    struct MemorySpectrum {
        core: SpectrumCore,
        store: Store,
    }

    impl MemorySpectrum {
        fn new(values: Vec<f64>, store: Store) -> Self {
            let n = values.len();
            let core = SpectrumCore::new(
                SpectrumTensor::real_from_vec(&[n], values).unwrap(),
                vec![DimParams::new(1, DomainType::Freq, DataType::Real, 100.0, "1H")],
            )
            .unwrap();
            Self { core, store }
        }
    }

    impl NmrSpectrum for MemorySpectrum {
        fn core(&self) -> &SpectrumCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut SpectrumCore {
            &mut self.core
        }

        fn data_layout(&self, _data_type: DataType, _dim: usize) -> Result<Layout> {
            Ok(Layout::Real)
        }
    }

    impl SpectrumIo for MemorySpectrum {
        fn load(&mut self, in_filepath: Option<&Path>) -> Result<()> {
            let path = begin_load(self, in_filepath)?;
            let (format, data) = self.store.borrow().get(&path).cloned().ok_or_else(|| {
                SpectrumError::Io(io::Error::new(io::ErrorKind::NotFound, "no such file"))
            })?;
            self.core.meta.insert("format".into(), json!(format.to_string()));
            self.core.set_data(data)
        }

        fn save(&self, out_filepath: Option<&Path>, format: SaveFormat, overwrite: bool) -> Result<()> {
            let path = target_path(self, out_filepath)?;
            if self.store.borrow().contains_key(&path) && !overwrite {
                return Err(already_exists(&path));
            }
            let data = self.core.data()?.clone();
            self.store.borrow_mut().insert(path, (format, data));
            Ok(())
        }
    }

    #[test]
    fn test_save_then_load() {
        let store = Store::default();
        let mut spec = MemorySpectrum::new(vec![1.0, 2.0, 3.0], store.clone());
        spec.core_mut().meta.insert("stale".into(), json!(1));
        spec.save(Some(Path::new("a.ft1")), SaveFormat::NmrPipe, false)
            .unwrap();

        let mut other = MemorySpectrum::new(vec![0.0; 3], store);
        other.core_mut().out_filepath = Some(PathBuf::from("b.ft1"));
        other.load(Some(Path::new("a.ft1"))).unwrap();
        assert_eq!(other.core().data().unwrap(), spec.core().data().unwrap());
        assert_eq!(other.core().in_filepath, Some(PathBuf::from("a.ft1")));
        assert_eq!(other.core().out_filepath, Some(PathBuf::from("b.ft1")));
        assert_eq!(other.core().meta.get("format"), Some(&json!("nmrpipe")));

        // reload from the recorded input path
        other.load(None).unwrap();
        assert!(other.core().has_data());
    }

    #[test]
    fn test_save_respects_overwrite() {
        let store = Store::default();
        let spec = MemorySpectrum::new(vec![1.0], store);
        let path = Some(Path::new("a.ucsf"));
        spec.save(path, SaveFormat::Ucsf, false).unwrap();
        let err = spec.save(path, SaveFormat::Ucsf, false).unwrap_err();
        assert!(matches!(err, SpectrumError::Io(ref e) if e.kind() == io::ErrorKind::AlreadyExists));
        spec.save(path, SaveFormat::Sparky, true).unwrap();
    }

    #[test]
    fn test_missing_paths() {
        let store = Store::default();
        let mut spec = MemorySpectrum::new(vec![1.0], store);
        assert!(matches!(
            spec.save(None, SaveFormat::NmrPipe, true),
            Err(SpectrumError::InvalidOperation(_))
        ));
        assert!(matches!(
            spec.load(None),
            Err(SpectrumError::InvalidOperation(_))
        ));
        // a failed load of a missing file leaves the spectrum without data
        assert!(spec.load(Some(Path::new("missing.fid"))).is_err());
        assert!(!spec.core().has_data());
    }

    #[test]
    fn test_ensure_writable() {
        let path = std::env::temp_dir().join(format!("nmrspec-io-{}.tmp", std::process::id()));
        std::fs::write(&path, b"x").unwrap();
        assert!(ensure_writable(&path, false).is_err());
        assert!(ensure_writable(&path, true).is_ok());
        std::fs::remove_file(&path).unwrap();
        assert!(ensure_writable(&path, false).is_ok());
    }
}
