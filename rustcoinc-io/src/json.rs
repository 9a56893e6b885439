//! JSON channel files.

use crate::Result;
use rustcoinc_core::ChannelSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a channel set from a JSON file.
///
/// The file holds one object keyed by channel label (`"A"` or `"Channel A"`),
/// each with `timestamps` in seconds and `amplitudes` in mV. Missing channels
/// are empty.
///
/// # Errors
/// Returns an error if the file cannot be opened or does not parse.
pub fn read_channels_json<P: AsRef<Path>>(path: P) -> Result<ChannelSet> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let channels: ChannelSet = serde_json::from_reader(reader)?;
    for channel in channels.iter() {
        log::debug!(
            "channel {}: {} events",
            channel.id,
            channel.events.len()
        );
    }
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustcoinc_core::ChannelId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_channels_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"A": {{"timestamps": [0.5, 1.5], "amplitudes": [10.0, 20.0]}},
               "Channel C": {{"timestamps": [0.7], "amplitudes": [3.0]}}}}"#
        )
        .unwrap();

        let channels = read_channels_json(file.path()).unwrap();
        assert_eq!(channels.get(ChannelId::A).timestamps, vec![0.5, 1.5]);
        assert!(channels.get(ChannelId::B).is_empty());
        assert_eq!(channels.get(ChannelId::C).amplitudes, vec![3.0]);
        assert!(channels.get(ChannelId::D).is_empty());
    }

    #[test]
    fn test_read_channels_json_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"A": {{"timestamps": [0.5]"#).unwrap();
        assert!(matches!(
            read_channels_json(file.path()),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_read_channels_json_missing_file() {
        assert!(matches!(
            read_channels_json("/nonexistent/channels.json"),
            Err(crate::Error::Io(_))
        ));
    }
}
