//! Configuration dispatch: picks a matcher from the channel roles and runs it.

use crate::assemble::assemble_table;
use crate::{VetoMatcher, WindowMatcher};
use rustcoinc_core::{
    ChannelId, ChannelSet, CoincidenceConfig, CoincidenceTable, Error, LabeledChannel,
    MatchResult, Result,
};
use std::fmt;

/// The supported (coincidence, anti-coincidence) channel layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    /// Two coincidence channels, window matcher.
    Coincidence2,
    /// Three coincidence channels, window matcher.
    Coincidence3,
    /// Four coincidence channels, window matcher.
    Coincidence4,
    /// Two primaries and one veto, two-pointer matcher.
    Coincidence2Anti1,
    /// Three primaries and one veto, two-pointer matcher.
    Coincidence3Anti1,
    /// Two primaries and two vetoes, two-pointer matcher.
    Coincidence2Anti2,
}

impl MatcherKind {
    /// Selects the matcher for the given role counts.
    pub fn select(coincidence: usize, anti_coincidence: usize) -> Result<Self> {
        match (coincidence, anti_coincidence) {
            (2, 0) => Ok(Self::Coincidence2),
            (3, 0) => Ok(Self::Coincidence3),
            (4, 0) => Ok(Self::Coincidence4),
            (2, 1) => Ok(Self::Coincidence2Anti1),
            (3, 1) => Ok(Self::Coincidence3Anti1),
            (2, 2) => Ok(Self::Coincidence2Anti2),
            _ => Err(Error::UnsupportedConfiguration {
                coincidence,
                anti_coincidence,
            }),
        }
    }

    /// Selects the matcher for a configuration.
    pub fn for_config(config: &CoincidenceConfig) -> Result<Self> {
        let counts = config.role_counts();
        Self::select(counts.coincidence, counts.anti_coincidence)
    }

    /// Number of coincidence channels.
    #[must_use]
    pub fn coincidence_count(self) -> usize {
        match self {
            Self::Coincidence2 | Self::Coincidence2Anti1 | Self::Coincidence2Anti2 => 2,
            Self::Coincidence3 | Self::Coincidence3Anti1 => 3,
            Self::Coincidence4 => 4,
        }
    }

    /// Number of anti-coincidence channels.
    #[must_use]
    pub fn anti_count(self) -> usize {
        match self {
            Self::Coincidence2 | Self::Coincidence3 | Self::Coincidence4 => 0,
            Self::Coincidence2Anti1 | Self::Coincidence3Anti1 => 1,
            Self::Coincidence2Anti2 => 2,
        }
    }

    /// Whether the two-pointer veto matcher runs.
    #[must_use]
    pub fn uses_veto(self) -> bool {
        self.anti_count() > 0
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.uses_veto() {
            write!(
                f,
                "{}-fold coincidence with {} veto channel(s)",
                self.coincidence_count(),
                self.anti_count()
            )
        } else {
            write!(f, "{}-fold coincidence", self.coincidence_count())
        }
    }
}

/// Matcher output together with the layout that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Coincidences {
    /// Layout selected from the role counts.
    pub kind: MatcherKind,
    /// Matched events of the coincidence channels.
    pub matched: MatchResult,
}

/// Runs the matcher selected by `config` on `channels`.
///
/// Ignored channels are never read. Coincidence channels are matched in
/// A-D order; the first one is the anchor of the window matcher.
///
/// # Errors
/// `UnsupportedConfiguration` for role counts without a matcher, and
/// `LengthMismatch` if a participating channel has unequal timestamp and
/// amplitude counts.
pub fn find_coincidences(channels: &ChannelSet, config: &CoincidenceConfig) -> Result<Coincidences> {
    let counts = config.role_counts();
    log::debug!(
        "Ignore: {}, Coincidence: {}, Anti-Coincidence: {}",
        counts.ignore,
        counts.coincidence,
        counts.anti_coincidence
    );
    let kind = MatcherKind::select(counts.coincidence, counts.anti_coincidence)?;

    let coincidence = labeled(channels, &config.coincidence_channels())?;
    let anti = labeled(channels, &config.anti_channels())?;
    log::debug!("running {kind} with window {} s", config.window);

    let matched = match kind {
        MatcherKind::Coincidence2 | MatcherKind::Coincidence3 | MatcherKind::Coincidence4 => {
            let (anchor, others) = coincidence
                .split_first()
                .ok_or(Error::UnsupportedConfiguration {
                    coincidence: counts.coincidence,
                    anti_coincidence: counts.anti_coincidence,
                })?;
            WindowMatcher::with_window(config.window).find(*anchor, others)
        }
        MatcherKind::Coincidence2Anti1
        | MatcherKind::Coincidence3Anti1
        | MatcherKind::Coincidence2Anti2 => {
            VetoMatcher::with_window(config.window).find(&coincidence, &anti)
        }
    };

    log::debug!("{} coincidences found", matched.len());
    Ok(Coincidences { kind, matched })
}

/// Runs the selected matcher and assembles the labeled table.
///
/// A `Sum_amplitude` column is added when no veto channel participates.
///
/// # Errors
/// Same as [`find_coincidences`].
pub fn calculate_coincidence(
    channels: &ChannelSet,
    config: &CoincidenceConfig,
) -> Result<CoincidenceTable> {
    let Coincidences { kind, matched } = find_coincidences(channels, config)?;
    Ok(assemble_table(&matched, !kind.uses_veto()))
}

fn labeled<'a>(channels: &'a ChannelSet, ids: &[ChannelId]) -> Result<Vec<LabeledChannel<'a>>> {
    ids.iter()
        .map(|&id| {
            let channel = channels.labeled(id);
            channel.events.check_lengths(id)?;
            Ok(channel)
        })
        .collect()
}
