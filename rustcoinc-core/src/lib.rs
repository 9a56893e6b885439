//! rustcoinc-core: Core types for multi-channel coincidence processing.
//!
//! This crate provides the data model shared by the matchers, the file
//! loaders and the command-line tool: channel identities and roles,
//! per-channel event storage, run configuration and the labeled results.
//!

pub mod channel;
pub mod config;
pub mod error;
pub mod matched;
pub mod table;

pub use channel::{ChannelEvents, ChannelId, ChannelRole, ChannelSet, LabeledChannel};
pub use config::{parse_roles, CoincidenceConfig, RoleCounts};
pub use error::{Error, Result};
pub use matched::{MatchResult, MatchedChannel};
pub use table::{amplitude_column, time_column, Column, CoincidenceTable, SUM_AMPLITUDE};
