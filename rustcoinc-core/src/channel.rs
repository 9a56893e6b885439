//! Channel identities, roles and per-channel event storage.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four digitiser inputs of the telescope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChannelId {
    A,
    B,
    C,
    D,
}

impl ChannelId {
    /// All channels in acquisition order.
    pub const ALL: [ChannelId; 4] = [ChannelId::A, ChannelId::B, ChannelId::C, ChannelId::D];

    /// Position of the channel in acquisition order (A = 0).
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Channel letter used in column labels.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ChannelId::A => "A",
            ChannelId::B => "B",
            ChannelId::C => "C",
            ChannelId::D => "D",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChannelId {
    type Err = Error;

    /// Accepts `"A"`, `"a"` or the recorder's group name `"Channel A"`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        let letter = name
            .strip_prefix("Channel")
            .map_or(name, str::trim_start);
        match letter {
            "A" | "a" => Ok(ChannelId::A),
            "B" | "b" => Ok(ChannelId::B),
            "C" | "c" => Ok(ChannelId::C),
            "D" | "d" => Ok(ChannelId::D),
            _ => Err(Error::InvalidChannel(s.to_string())),
        }
    }
}

/// Role a channel plays in one coincidence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChannelRole {
    /// Channel is not used.
    #[default]
    Ignore,
    /// Channel must fire for an event group to be accepted.
    Coincidence,
    /// Channel activity vetoes an otherwise accepted event group.
    AntiCoincidence,
}

impl ChannelRole {
    /// Maps the acquisition software's numeric criteria (0, 1, 2).
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ChannelRole::Ignore),
            1 => Ok(ChannelRole::Coincidence),
            2 => Ok(ChannelRole::AntiCoincidence),
            other => Err(Error::InvalidRole(other.to_string())),
        }
    }

    /// Single-character code (`I`, `C`, `A`).
    #[must_use]
    pub fn code(self) -> char {
        match self {
            ChannelRole::Ignore => 'I',
            ChannelRole::Coincidence => 'C',
            ChannelRole::AntiCoincidence => 'A',
        }
    }
}

impl fmt::Display for ChannelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelRole::Ignore => "ignore",
            ChannelRole::Coincidence => "coincidence",
            ChannelRole::AntiCoincidence => "anti-coincidence",
        };
        f.write_str(name)
    }
}

impl FromStr for ChannelRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" | "0" | "ignore" => Ok(ChannelRole::Ignore),
            "c" | "1" | "coincidence" => Ok(ChannelRole::Coincidence),
            "a" | "2" | "anti" | "anti-coincidence" | "anticoincidence" => {
                Ok(ChannelRole::AntiCoincidence)
            }
            _ => Err(Error::InvalidRole(s.to_string())),
        }
    }
}

/// Events of a single channel stored in Structure of Arrays layout.
///
/// `timestamps` (seconds) and `amplitudes` (millivolts) are index-aligned.
/// Matchers expect non-decreasing timestamps; use [`ChannelEvents::validate`]
/// when the source is not trusted.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelEvents {
    /// Event times in seconds.
    pub timestamps: Vec<f64>,
    /// Pulse amplitudes in millivolts.
    pub amplitudes: Vec<f64>,
}

impl ChannelEvents {
    /// Creates channel events from parallel sequences.
    #[must_use]
    pub fn new(timestamps: Vec<f64>, amplitudes: Vec<f64>) -> Self {
        Self {
            timestamps,
            amplitudes,
        }
    }

    /// Creates an empty channel with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            amplitudes: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns true if the channel recorded nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Pushes a single event.
    pub fn push(&mut self, timestamp: f64, amplitude: f64) {
        self.timestamps.push(timestamp);
        self.amplitudes.push(amplitude);
    }

    /// First and last timestamp, if any.
    #[must_use]
    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }

    /// Checks that lengths agree and timestamps never decrease.
    pub fn validate(&self, channel: ChannelId) -> Result<()> {
        self.check_lengths(channel)?;
        if let Some(pos) = self.timestamps.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::UnsortedTimestamps {
                channel,
                index: pos + 1,
            });
        }
        Ok(())
    }

    /// Checks only that the two sequences have equal length.
    pub fn check_lengths(&self, channel: ChannelId) -> Result<()> {
        if self.timestamps.len() == self.amplitudes.len() {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                channel,
                timestamps: self.timestamps.len(),
                amplitudes: self.amplitudes.len(),
            })
        }
    }
}

/// Borrowed channel data tagged with its identity.
#[derive(Debug, Clone, Copy)]
pub struct LabeledChannel<'a> {
    pub id: ChannelId,
    pub events: &'a ChannelEvents,
}

impl<'a> LabeledChannel<'a> {
    #[must_use]
    pub fn new(id: ChannelId, events: &'a ChannelEvents) -> Self {
        Self { id, events }
    }
}

/// The four channels of one recording.
///
/// A channel that was inactive during acquisition is simply empty.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelSet {
    #[cfg_attr(feature = "serde", serde(rename = "A", alias = "Channel A", default))]
    pub a: ChannelEvents,
    #[cfg_attr(feature = "serde", serde(rename = "B", alias = "Channel B", default))]
    pub b: ChannelEvents,
    #[cfg_attr(feature = "serde", serde(rename = "C", alias = "Channel C", default))]
    pub c: ChannelEvents,
    #[cfg_attr(feature = "serde", serde(rename = "D", alias = "Channel D", default))]
    pub d: ChannelEvents,
}

impl ChannelSet {
    /// Creates a set with four empty channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the events of one channel.
    #[must_use]
    pub fn with_channel(mut self, id: ChannelId, events: ChannelEvents) -> Self {
        *self.get_mut(id) = events;
        self
    }

    /// Returns the events of one channel.
    #[must_use]
    pub fn get(&self, id: ChannelId) -> &ChannelEvents {
        match id {
            ChannelId::A => &self.a,
            ChannelId::B => &self.b,
            ChannelId::C => &self.c,
            ChannelId::D => &self.d,
        }
    }

    /// Returns the events of one channel for modification.
    pub fn get_mut(&mut self, id: ChannelId) -> &mut ChannelEvents {
        match id {
            ChannelId::A => &mut self.a,
            ChannelId::B => &mut self.b,
            ChannelId::C => &mut self.c,
            ChannelId::D => &mut self.d,
        }
    }

    /// Returns a labeled view of one channel.
    #[must_use]
    pub fn labeled(&self, id: ChannelId) -> LabeledChannel<'_> {
        LabeledChannel::new(id, self.get(id))
    }

    /// Iterates over all four channels in acquisition order.
    pub fn iter(&self) -> impl Iterator<Item = LabeledChannel<'_>> {
        ChannelId::ALL.into_iter().map(|id| self.labeled(id))
    }

    /// Validates every channel.
    pub fn validate(&self) -> Result<()> {
        self.iter()
            .try_for_each(|channel| channel.events.validate(channel.id))
    }
}
