//! ROSY HDF5 recordings.
//!
//! A recording has one top-level group per channel (`"Channel A"` ...) plus a
//! `"Coincidence"` group written by the acquisition software, which is not
//! read here. The file attribute `"Active channels"` flags which groups hold
//! data; each active group stores a compound `"Amplitude-Timestamp"` dataset.

use crate::{Error, Result};
use hdf5::{File, H5Type};
use rustcoinc_core::{ChannelEvents, ChannelId, ChannelSet};
use std::path::Path;

const NS_TO_S: f64 = 1e-9;
const ACTIVE_CHANNELS_ATTR: &str = "Active channels";
const EVENTS_DATASET: &str = "Amplitude-Timestamp";
const COINCIDENCE_GROUP: &str = "Coincidence";

/// One record of the `"Amplitude-Timestamp"` dataset.
#[derive(H5Type, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct RosyEvent {
    /// Trigger time in nanoseconds.
    #[hdf5(rename = "Time [ns]")]
    pub time_ns: f64,
    /// Pulse amplitude in mV.
    #[hdf5(rename = "Amplitude [mV]")]
    pub amplitude_mv: f64,
}

/// Reads the channels of a ROSY recording.
///
/// Timestamps are converted to seconds. Inactive channels stay empty.
///
/// # Errors
/// Returns an error if the file cannot be opened, the `"Active channels"`
/// attribute is missing, or an active channel has no readable event dataset.
pub fn read_rosy_hdf5<P: AsRef<Path>>(path: P) -> Result<ChannelSet> {
    let file = File::open(path.as_ref())?;
    let active: Vec<bool> = file
        .attr(ACTIVE_CHANNELS_ATTR)
        .map_err(|_| {
            Error::InvalidFormat(format!("missing file attribute {ACTIVE_CHANNELS_ATTR:?}"))
        })?
        .read_raw()?;

    let mut channels = ChannelSet::new();
    // Activity flags are indexed by group order, the coincidence group included
    for (index, name) in file.member_names()?.iter().enumerate() {
        if name == COINCIDENCE_GROUP {
            continue;
        }
        let Ok(id) = name.parse::<ChannelId>() else {
            log::warn!("skipping unknown group {name:?}");
            continue;
        };
        if !active.get(index).copied().unwrap_or(false) {
            log::warn!("{name} is inactive, leaving it empty");
            continue;
        }

        let records: Vec<RosyEvent> = file.group(name)?.dataset(EVENTS_DATASET)?.read_raw()?;
        *channels.get_mut(id) = events_from_records(&records);
        log::debug!("{name}: {} events", records.len());
    }
    Ok(channels)
}

fn events_from_records(records: &[RosyEvent]) -> ChannelEvents {
    let mut events = ChannelEvents::with_capacity(records.len());
    for record in records {
        events.push(record.time_ns * NS_TO_S, record.amplitude_mv);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    fn write_recording(path: &Path, active: &[bool], events: &[(&str, Vec<RosyEvent>)]) {
        let file = File::create(path).unwrap();
        file.new_attr::<bool>()
            .shape(active.len())
            .create(ACTIVE_CHANNELS_ATTR)
            .unwrap()
            .write_raw(active)
            .unwrap();
        for (name, records) in events {
            let group = file.create_group(name).unwrap();
            group
                .new_dataset::<RosyEvent>()
                .shape(records.len())
                .create(EVENTS_DATASET)
                .unwrap()
                .write_raw(records.as_slice())
                .unwrap();
        }
    }

    fn event(time_ns: f64, amplitude_mv: f64) -> RosyEvent {
        RosyEvent {
            time_ns,
            amplitude_mv,
        }
    }

    #[test]
    fn test_read_rosy_recording() {
        let file = NamedTempFile::new().unwrap();
        write_recording(
            file.path(),
            &[true, false, true, false, false],
            &[
                ("Channel A", vec![event(1_000.0, 12.5), event(2_500.0, 40.0)]),
                ("Channel B", vec![event(7.0, 1.0)]),
                ("Channel C", vec![event(1_010.0, 30.0)]),
                ("Channel D", vec![event(3_000.0, 5.0)]),
                ("Coincidence", vec![event(0.0, 0.0)]),
            ],
        );

        let channels = read_rosy_hdf5(file.path()).unwrap();
        let a = channels.get(ChannelId::A);
        assert_eq!(a.len(), 2);
        assert_relative_eq!(a.timestamps[0], 1e-6);
        assert_relative_eq!(a.timestamps[1], 2.5e-6);
        assert_eq!(a.amplitudes, vec![12.5, 40.0]);
        // B and D are flagged inactive even though they have datasets
        assert!(channels.get(ChannelId::B).is_empty());
        assert_relative_eq!(channels.get(ChannelId::C).timestamps[0], 1.01e-6);
        assert!(channels.get(ChannelId::D).is_empty());
    }

    #[test]
    fn test_missing_active_channels_attr() {
        let file = NamedTempFile::new().unwrap();
        File::create(file.path())
            .unwrap()
            .create_group("Channel A")
            .unwrap();
        assert!(matches!(
            read_rosy_hdf5(file.path()),
            Err(Error::InvalidFormat(_))
        ));
    }
}
