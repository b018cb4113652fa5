//! Where the seed dataset comes from.
//!
//! [`EmbeddedDataset`] ships with the binary; [`JsonFileDataset`] reads the
//! same JSON shape from disk so operators can seed custom menus.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use menuseed_core::{Dataset, DatasetError, DatasetSource};

const EMBEDDED_ORIGIN: &str = "embedded dataset";
const EMBEDDED_JSON: &str = include_str!("../../data/menu.json");

/// The dataset compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDataset;

impl DatasetSource for EmbeddedDataset {
    fn load(&self) -> Result<Dataset, DatasetError> {
        Dataset::from_json_str(EMBEDDED_ORIGIN, EMBEDDED_JSON)
    }
}

/// A dataset read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileDataset {
    path: Utf8PathBuf,
}

impl JsonFileDataset {
    /// Source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl DatasetSource for JsonFileDataset {
    fn load(&self) -> Result<Dataset, DatasetError> {
        let origin = self.path.to_string();
        debug!("reading dataset from {origin}");
        let json = menuseed_fs::read_utf8_file(&self.path)
            .map_err(|source| DatasetError::Read {
                origin: origin.clone(),
                source,
            })?;
        Dataset::from_json_str(&origin, &json)
    }
}
