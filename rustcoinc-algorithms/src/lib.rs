//! rustcoinc-algorithms: Coincidence matchers for multi-channel event streams.
//!
//! This crate provides two matcher families and the dispatch between them:
//! - **Window** - binary search around each anchor event, no vetoes, 2-4 channels
//! - **Veto** - two-pointer merge of 2-3 primaries with 1-2 anti-coincidence channels
//!
//! plus the result assembler and a count-rate histogram helper.
//!
#![warn(missing_docs)]

mod assemble;
mod processing;
mod rate;
mod veto;
mod window;

pub use assemble::assemble_table;
pub use processing::{calculate_coincidence, find_coincidences, Coincidences, MatcherKind};
pub use rate::{count_rate, CountRate, MAX_BIN_EDGES};
pub use veto::{VetoConfig, VetoMatcher};
pub use window::{WindowConfig, WindowMatcher};

// Re-export core configuration types
pub use rustcoinc_core::{ChannelRole, CoincidenceConfig};
