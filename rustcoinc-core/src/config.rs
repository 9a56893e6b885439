//! Coincidence run configuration.

use crate::channel::{ChannelId, ChannelRole};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Role assignment for channels A-D plus the shared coincidence window.
///
/// The window is used differently by the two matcher families: the
/// pure-coincidence matcher searches `[t - window, t + window)` around each
/// anchor event, while the veto matcher requires the primary events to lie
/// within `window` of each other and looks for veto hits in
/// `[min, min + window]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoincidenceConfig {
    /// Role of channels A, B, C and D, in that order.
    pub roles: [ChannelRole; 4],
    /// Coincidence window in seconds.
    pub window: f64,
}

impl Default for CoincidenceConfig {
    fn default() -> Self {
        Self {
            roles: [ChannelRole::Ignore; 4],
            window: 1e-6, // 1 microsecond
        }
    }
}

impl CoincidenceConfig {
    /// Creates a configuration with every channel ignored.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the role of one channel.
    #[must_use]
    pub fn with_role(mut self, channel: ChannelId, role: ChannelRole) -> Self {
        self.roles[channel.index()] = role;
        self
    }

    /// Sets all four roles at once.
    #[must_use]
    pub fn with_roles(mut self, roles: [ChannelRole; 4]) -> Self {
        self.roles = roles;
        self
    }

    /// Sets the coincidence window (seconds).
    #[must_use]
    pub fn with_window(mut self, window: f64) -> Self {
        self.window = window;
        self
    }

    /// Role of a channel.
    #[must_use]
    pub fn role(&self, channel: ChannelId) -> ChannelRole {
        self.roles[channel.index()]
    }

    /// Channels holding `role`, in acquisition order.
    #[must_use]
    pub fn channels_with(&self, role: ChannelRole) -> Vec<ChannelId> {
        ChannelId::ALL
            .into_iter()
            .filter(|&channel| self.role(channel) == role)
            .collect()
    }

    /// Coincidence channels in acquisition order.
    #[must_use]
    pub fn coincidence_channels(&self) -> Vec<ChannelId> {
        self.channels_with(ChannelRole::Coincidence)
    }

    /// Anti-coincidence channels in acquisition order.
    #[must_use]
    pub fn anti_channels(&self) -> Vec<ChannelId> {
        self.channels_with(ChannelRole::AntiCoincidence)
    }

    /// Number of channels per role.
    #[must_use]
    pub fn role_counts(&self) -> RoleCounts {
        let mut counts = RoleCounts::default();
        for role in self.roles {
            match role {
                ChannelRole::Ignore => counts.ignore += 1,
                ChannelRole::Coincidence => counts.coincidence += 1,
                ChannelRole::AntiCoincidence => counts.anti_coincidence += 1,
            }
        }
        counts
    }
}

/// Per-role channel counts of a configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub ignore: usize,
    pub coincidence: usize,
    pub anti_coincidence: usize,
}

/// Parses a role string such as `"CCAI"` or `"1,1,2,0"` into roles for A-D.
///
/// Each channel takes one code: `I`/`0` ignore, `C`/`1` coincidence,
/// `A`/`2` anti-coincidence. Commas and whitespace are ignored.
pub fn parse_roles(s: &str) -> Result<[ChannelRole; 4]> {
    let codes: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if codes.len() != 4 {
        return Err(Error::InvalidRole(format!(
            "expected 4 channel roles, got {s:?}"
        )));
    }
    let mut roles = [ChannelRole::Ignore; 4];
    for (role, code) in roles.iter_mut().zip(codes) {
        *role = code.to_string().parse()?;
    }
    Ok(roles)
}
