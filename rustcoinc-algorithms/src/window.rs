//! Binary-search window matcher for pure coincidence runs.
//!
//! The first channel is the anchor. For every anchor event at `t` each other
//! channel is searched for events in `[t - window, t + window)`; the anchor is
//! kept only if every other channel has at least one. The earliest event of
//! each range is reported. Events of the other channels are not consumed, so
//! one event may be paired with several anchors.
//!
//! Complexity: O(M log S) per secondary channel.

use rustcoinc_core::{ChannelId, LabeledChannel, MatchResult};

/// Window matcher configuration.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Half-width of the search interval around each anchor (seconds).
    pub window: f64,
}

/// N-way coincidence matcher for 2, 3 or 4 channels without vetoes.
#[derive(Clone, Debug)]
pub struct WindowMatcher {
    config: WindowConfig,
}

impl WindowMatcher {
    /// Create with custom configuration.
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Create with a window in seconds.
    #[must_use]
    pub fn with_window(window: f64) -> Self {
        Self::new(WindowConfig { window })
    }

    /// Window half-width in seconds.
    #[must_use]
    pub fn window(&self) -> f64 {
        self.config.window
    }

    /// Matches `others` against the `anchor` channel.
    ///
    /// With no other channels every anchor event is accepted.
    ///
    /// # Panics
    /// Panics if a channel has fewer amplitudes than timestamps.
    #[must_use]
    pub fn find(&self, anchor: LabeledChannel<'_>, others: &[LabeledChannel<'_>]) -> MatchResult {
        let ids: Vec<ChannelId> = std::iter::once(anchor.id)
            .chain(others.iter().map(|c| c.id))
            .collect();
        let mut result = MatchResult::for_channels(&ids);

        // Index of the first in-window event per other channel, reused per anchor
        let mut firsts = vec![0usize; others.len()];

        for (i, &t) in anchor.events.timestamps.iter().enumerate() {
            let lo = t - self.config.window;
            let hi = t + self.config.window;

            let all_present = others.iter().zip(firsts.iter_mut()).all(|(other, first)| {
                match window_range(&other.events.timestamps, lo, hi) {
                    Some(start) => {
                        *first = start;
                        true
                    }
                    None => false,
                }
            });
            if !all_present {
                continue;
            }

            result.channels[0]
                .events
                .push(t, anchor.events.amplitudes[i]);
            for ((matched, other), &j) in result.channels[1..]
                .iter_mut()
                .zip(others)
                .zip(firsts.iter())
            {
                matched
                    .events
                    .push(other.events.timestamps[j], other.events.amplitudes[j]);
            }
        }

        log::trace!(
            "window matcher: {} of {} anchor events on {} accepted",
            result.len(),
            anchor.events.len(),
            anchor.id
        );
        result
    }
}

/// Index of the first timestamp in `[lo, hi)`, or `None` if the range is empty.
fn window_range(timestamps: &[f64], lo: f64, hi: f64) -> Option<usize> {
    let start = timestamps.partition_point(|&x| x < lo);
    let end = timestamps.partition_point(|&x| x < hi);
    (start < end).then_some(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustcoinc_core::ChannelEvents;

    #[test]
    fn test_window_range_half_open() {
        let ts = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(window_range(&ts, 0.5, 2.5), Some(1));
        assert_eq!(window_range(&ts, 1.0, 2.0), Some(1));
        // Upper bound is exclusive
        assert_eq!(window_range(&ts, 0.5, 1.0), None);
        // Zero-width interval is always empty
        assert_eq!(window_range(&ts, 2.0, 2.0), None);
        assert_eq!(window_range(&[], 0.0, 10.0), None);
    }

    #[test]
    fn test_window_config() {
        let matcher = WindowMatcher::with_window(0.25);
        assert!((matcher.window() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_event_in_range_is_selected() {
        let a = ChannelEvents::new(vec![1.0], vec![5.0]);
        let b = ChannelEvents::new(vec![0.8, 0.95, 1.05], vec![1.0, 2.0, 3.0]);
        let matcher = WindowMatcher::with_window(0.1);
        let result = matcher.find(
            LabeledChannel::new(ChannelId::A, &a),
            &[LabeledChannel::new(ChannelId::B, &b)],
        );
        let matched_b = result.channel(ChannelId::B).unwrap();
        // 1.05 is closer but 0.95 comes first
        assert_eq!(matched_b.timestamps, vec![0.95]);
        assert_eq!(matched_b.amplitudes, vec![2.0]);
    }

    #[test]
    fn test_secondary_event_reused_across_anchors() {
        let a = ChannelEvents::new(vec![1.0, 1.02, 1.04], vec![1.0, 2.0, 3.0]);
        let b = ChannelEvents::new(vec![1.01], vec![9.0]);
        let matcher = WindowMatcher::with_window(0.05);
        let result = matcher.find(
            LabeledChannel::new(ChannelId::A, &a),
            &[LabeledChannel::new(ChannelId::B, &b)],
        );
        assert_eq!(result.len(), 3);
        assert_eq!(
            result.channel(ChannelId::B).unwrap().timestamps,
            vec![1.01, 1.01, 1.01]
        );
    }

    #[test]
    fn test_anchor_only() {
        let a = ChannelEvents::new(vec![1.0, 2.0], vec![1.0, 2.0]);
        let result = WindowMatcher::with_window(0.1).find(LabeledChannel::new(ChannelId::A, &a), &[]);
        assert_eq!(result.len(), 2);
    }
}
