//! Raw matcher output.

use crate::channel::{ChannelEvents, ChannelId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Matched events of one participating channel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchedChannel {
    /// Channel the events were taken from.
    pub id: ChannelId,
    /// Selected events, one per accepted group.
    pub events: ChannelEvents,
}

impl MatchedChannel {
    /// Creates an empty matched channel.
    #[must_use]
    pub fn new(id: ChannelId) -> Self {
        Self {
            id,
            events: ChannelEvents::default(),
        }
    }
}

/// Parallel matched sequences, row `i` being one accepted event group.
///
/// Every channel holds the same number of events.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchResult {
    /// Participating channels in the order they were selected.
    pub channels: Vec<MatchedChannel>,
}

impl MatchResult {
    /// Creates an empty result for the given channels.
    #[must_use]
    pub fn for_channels(ids: &[ChannelId]) -> Self {
        Self {
            channels: ids.iter().copied().map(MatchedChannel::new).collect(),
        }
    }

    /// Number of accepted event groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, |c| c.events.len())
    }

    /// Returns true if nothing was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Matched events of one channel, if it participated.
    #[must_use]
    pub fn channel(&self, id: ChannelId) -> Option<&ChannelEvents> {
        self.channels
            .iter()
            .find(|c| c.id == id)
            .map(|c| &c.events)
    }

    /// Channel ids in result order.
    #[must_use]
    pub fn ids(&self) -> Vec<ChannelId> {
        self.channels.iter().map(|c| c.id).collect()
    }
}
