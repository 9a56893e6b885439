//! Two-pointer merge matcher with anti-coincidence vetoes.
//!
//! Every primary and veto channel keeps its own cursor. Each round looks at
//! the current primary events:
//!
//! - they are a candidate if `max - min <= window`;
//! - each veto channel skips events below `min` for good and vetoes the round
//!   if it has an event in `[min, min + window]`;
//! - an accepted candidate consumes one event of every primary channel,
//!   otherwise only the primaries sitting at `min` move on.
//!
//! Unlike the window matcher, primary events are consumed: each one ends up
//! in at most one accepted row.

use rustcoinc_core::{ChannelId, LabeledChannel, MatchResult};

/// Veto matcher configuration.
#[derive(Clone, Debug)]
pub struct VetoConfig {
    /// Maximum spread of primary timestamps, and length of the veto
    /// look-ahead after the earliest primary (seconds).
    pub window: f64,
}

/// Streaming coincidence matcher for 2-3 primary and 1-2 veto channels.
#[derive(Clone, Debug)]
pub struct VetoMatcher {
    config: VetoConfig,
}

/// Cursor over one veto channel.
#[derive(Debug)]
struct VetoCursor<'a> {
    timestamps: &'a [f64],
    pos: usize,
}

impl VetoCursor<'_> {
    /// Moves past events before `min` and reports whether the next event
    /// falls in `[min, min + window]`. The vetoing event is not consumed.
    fn vetoes(&mut self, min: f64, window: f64) -> bool {
        while let Some(&t) = self.timestamps.get(self.pos) {
            if t > min + window {
                return false;
            }
            if t >= min {
                return true;
            }
            self.pos += 1;
        }
        false
    }
}

impl VetoMatcher {
    /// Create with custom configuration.
    #[must_use]
    pub fn new(config: VetoConfig) -> Self {
        Self { config }
    }

    /// Create with a window in seconds.
    #[must_use]
    pub fn with_window(window: f64) -> Self {
        Self::new(VetoConfig { window })
    }

    /// Window in seconds.
    #[must_use]
    pub fn window(&self) -> f64 {
        self.config.window
    }

    /// Matches the `primaries` against each other, vetoed by `vetoes`.
    ///
    /// The result holds the primary channels only. With no primaries the
    /// result is empty.
    ///
    /// # Panics
    /// Panics if a primary channel has fewer amplitudes than timestamps.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn find(
        &self,
        primaries: &[LabeledChannel<'_>],
        vetoes: &[LabeledChannel<'_>],
    ) -> MatchResult {
        let window = self.config.window;
        let ids: Vec<ChannelId> = primaries.iter().map(|c| c.id).collect();
        let mut result = MatchResult::for_channels(&ids);
        if primaries.is_empty() {
            return result;
        }

        let mut cursors = vec![0usize; primaries.len()];
        let mut veto_cursors: Vec<VetoCursor<'_>> = vetoes
            .iter()
            .map(|c| VetoCursor {
                timestamps: &c.events.timestamps,
                pos: 0,
            })
            .collect();
        let mut rounds = 0usize;

        while primaries
            .iter()
            .zip(&cursors)
            .all(|(c, &pos)| pos < c.events.len())
        {
            rounds += 1;
            let (min_val, max_val) = primaries.iter().zip(&cursors).fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), (c, &pos)| {
                    let t = c.events.timestamps[pos];
                    (lo.min(t), hi.max(t))
                },
            );

            // Every veto cursor advances each round, even when another
            // channel has already vetoed.
            let vetoed = veto_cursors
                .iter_mut()
                .fold(false, |acc, cursor| cursor.vetoes(min_val, window) | acc);

            if max_val - min_val <= window && !vetoed {
                for ((matched, primary), pos) in result
                    .channels
                    .iter_mut()
                    .zip(primaries)
                    .zip(cursors.iter_mut())
                {
                    matched.events.push(
                        primary.events.timestamps[*pos],
                        primary.events.amplitudes[*pos],
                    );
                    *pos += 1;
                }
            } else {
                let mut advanced = false;
                for (primary, pos) in primaries.iter().zip(cursors.iter_mut()) {
                    if primary.events.timestamps[*pos] == min_val {
                        *pos += 1;
                        advanced = true;
                    }
                }
                // Only reachable with NaN timestamps, which never equal the minimum
                if !advanced {
                    cursors.iter_mut().for_each(|pos| *pos += 1);
                }
            }
        }

        log::trace!(
            "veto matcher: {} rows accepted in {} rounds ({} primary, {} veto channels)",
            result.len(),
            rounds,
            primaries.len(),
            vetoes.len()
        );
        result
    }
}
