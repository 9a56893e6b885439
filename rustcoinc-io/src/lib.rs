//! rustcoinc-io: Channel loaders and result writers for rustcoinc.
//!
//! Channels are read from JSON files or, with the `hdf5` feature, from ROSY
//! HDF5 recordings. Coincidence tables and count rates are written as CSV
//! or JSON.
//!

mod error;
#[cfg(feature = "hdf5")]
pub mod hdf5;
mod json;
mod writer;

pub use error::{Error, Result};
#[cfg(feature = "hdf5")]
pub use hdf5::read_rosy_hdf5;
pub use json::read_channels_json;
pub use writer::TableFileWriter;

use rustcoinc_core::ChannelSet;
use std::path::Path;

/// Loads a channel set, choosing the reader from the file extension.
///
/// `.json` files are read with [`read_channels_json`]; `.h5` and `.hdf5`
/// files need the `hdf5` feature.
///
/// # Errors
/// Returns `InvalidFormat` for unknown extensions, otherwise any error of
/// the selected reader.
pub fn load_channels<P: AsRef<Path>>(path: P) -> Result<ChannelSet> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => read_channels_json(path),
        #[cfg(feature = "hdf5")]
        "h5" | "hdf5" => read_rosy_hdf5(path),
        #[cfg(not(feature = "hdf5"))]
        "h5" | "hdf5" => Err(Error::InvalidFormat(format!(
            "{} is an HDF5 file but rustcoinc-io was built without the hdf5 feature",
            path.display()
        ))),
        _ => Err(Error::InvalidFormat(format!(
            "unsupported input file {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_channels_rejects_unknown_extension() {
        assert!(matches!(
            load_channels("recording.txt"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            load_channels("recording"),
            Err(Error::InvalidFormat(_))
        ));
    }
}
