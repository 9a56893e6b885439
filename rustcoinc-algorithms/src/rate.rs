//! Count-rate histogram of a single channel.

use rustcoinc_core::{Error, Result};

/// Upper bound on the number of bin edges of one histogram.
pub const MAX_BIN_EDGES: usize = 100_000_000;

/// Count rate per time bin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountRate {
    /// Counts per second in each bin.
    pub rates: Vec<f64>,
    /// Bin edges in seconds, one more than `rates` when non-empty.
    pub bin_edges: Vec<f64>,
}

impl CountRate {
    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no bin was formed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterates over `(bin_start, bin_end, rate)`.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.bin_edges
            .windows(2)
            .zip(&self.rates)
            .map(|(edges, &rate)| (edges[0], edges[1], rate))
    }
}

/// Computes the count rate of `timestamps` in bins of `bin_width` seconds.
///
/// Edges start at the earliest timestamp and stop before the second-to-last
/// one, so the tail of the acquisition (often a partial bin) is left out.
/// Bins are half-open except the last, which includes its right edge.
///
/// # Errors
/// `InvalidBinWidth` unless `bin_width` is finite and positive and yields at
/// most [`MAX_BIN_EDGES`] edges, `InsufficientEvents` with fewer than two
/// timestamps.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn count_rate(timestamps: &[f64], bin_width: f64) -> Result<CountRate> {
    if !(bin_width.is_finite() && bin_width > 0.0) {
        return Err(Error::InvalidBinWidth(bin_width));
    }
    if timestamps.len() < 2 {
        return Err(Error::InsufficientEvents {
            required: 2,
            found: timestamps.len(),
        });
    }

    let start = timestamps.iter().copied().fold(f64::INFINITY, f64::min);
    let stop = timestamps[timestamps.len() - 2];
    let span = ((stop - start) / bin_width).ceil().max(0.0);
    if !span.is_finite() || span > MAX_BIN_EDGES as f64 {
        return Err(Error::InvalidBinWidth(bin_width));
    }
    let num_edges = span as usize;
    let bin_edges: Vec<f64> = (0..num_edges)
        .map(|i| start + i as f64 * bin_width)
        .collect();

    if bin_edges.len() < 2 {
        return Ok(CountRate {
            rates: Vec::new(),
            bin_edges,
        });
    }

    let num_bins = bin_edges.len() - 1;
    let first = bin_edges[0];
    let last = bin_edges[num_bins];
    let mut counts = vec![0u64; num_bins];
    for &t in timestamps {
        if t < first || t > last {
            continue;
        }
        let bin = bin_edges.partition_point(|&edge| edge <= t) - 1;
        counts[bin.min(num_bins - 1)] += 1;
    }

    let rates = counts.iter().map(|&n| n as f64 / bin_width).collect();
    Ok(CountRate { rates, bin_edges })
}
