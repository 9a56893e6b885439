//! Conversion of matcher output into a labeled table.

use rustcoinc_core::{amplitude_column, time_column, CoincidenceTable, MatchResult, SUM_AMPLITUDE};

/// Builds the coincidence table from matcher output.
///
/// Each matched channel contributes a `<channel>_time` and a
/// `<channel>_amplitude` column, in result order. With `include_sum` a
/// `Sum_amplitude` column holds the row-wise amplitude sum.
#[must_use]
pub fn assemble_table(result: &MatchResult, include_sum: bool) -> CoincidenceTable {
    let mut table = CoincidenceTable::new();
    for matched in &result.channels {
        table.push_column(time_column(matched.id), matched.events.timestamps.clone());
        table.push_column(
            amplitude_column(matched.id),
            matched.events.amplitudes.clone(),
        );
    }

    if include_sum {
        let mut sum = vec![0.0; result.len()];
        for matched in &result.channels {
            for (total, amplitude) in sum.iter_mut().zip(&matched.events.amplitudes) {
                *total += amplitude;
            }
        }
        table.push_column(SUM_AMPLITUDE, sum);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rustcoinc_core::ChannelId;

    fn sample_result() -> MatchResult {
        let mut result = MatchResult::for_channels(&[ChannelId::B, ChannelId::D]);
        result.channels[0].events.push(1.0, 10.5);
        result.channels[0].events.push(2.0, 20.0);
        result.channels[1].events.push(1.01, 0.25);
        result.channels[1].events.push(2.02, 5.0);
        result
    }

    #[test]
    fn test_columns_follow_channel_labels() {
        let table = assemble_table(&sample_result(), false);
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["B_time", "B_amplitude", "D_time", "D_amplitude"]);
        assert_eq!(table.column("D_time"), Some(&[1.01, 2.02][..]));
    }

    #[test]
    fn test_sum_amplitude_column() {
        let table = assemble_table(&sample_result(), true);
        let sum = table.column(SUM_AMPLITUDE).unwrap();
        assert_eq!(sum.len(), 2);
        assert_relative_eq!(sum[0], 10.75);
        assert_relative_eq!(sum[1], 25.0);
    }

    #[test]
    fn test_empty_result_keeps_columns() {
        let result = MatchResult::for_channels(&[ChannelId::A, ChannelId::C]);
        let table = assemble_table(&result, true);
        assert_eq!(table.num_columns(), 5);
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.column(SUM_AMPLITUDE), Some(&[][..]));
    }
}
