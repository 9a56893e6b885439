//! Labeled tabular coincidence output.

use crate::channel::{ChannelEvents, ChannelId};
use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Name of the summed-amplitude column.
pub const SUM_AMPLITUDE: &str = "Sum_amplitude";

/// Name of the time column of a channel, e.g. `A_time`.
#[must_use]
pub fn time_column(channel: ChannelId) -> String {
    format!("{channel}_time")
}

/// Name of the amplitude column of a channel, e.g. `A_amplitude`.
#[must_use]
pub fn amplitude_column(channel: ChannelId) -> String {
    format!("{channel}_amplitude")
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Coincidence events as ordered, row-aligned columns.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CoincidenceTable {
    columns: Vec<Column>,
}

impl CoincidenceTable {
    /// Creates a table without columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    ///
    /// # Panics
    /// Panics if `values` does not match the row count of existing columns.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) {
        if let Some(first) = self.columns.first() {
            assert_eq!(
                first.values.len(),
                values.len(),
                "columns must be row-aligned"
            );
        }
        self.columns.push(Column {
            name: name.into(),
            values,
        });
    }

    /// Number of rows (accepted coincidences).
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Columns in insertion order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Channels that have a time column, in column order.
    #[must_use]
    pub fn channels(&self) -> Vec<ChannelId> {
        self.columns
            .iter()
            .filter_map(|c| c.name.strip_suffix("_time"))
            .filter_map(|label| label.parse().ok())
            .collect()
    }

    /// Regroups the time and amplitude columns of a channel.
    #[must_use]
    pub fn channel_events(&self, channel: ChannelId) -> Option<ChannelEvents> {
        let timestamps = self.column(&time_column(channel))?;
        let amplitudes = self.column(&amplitude_column(channel))?;
        Some(ChannelEvents::new(timestamps.to_vec(), amplitudes.to_vec()))
    }

    /// Values of one row, in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index]).collect())
    }
}

impl TryFrom<Vec<Column>> for CoincidenceTable {
    type Error = Error;

    /// Builds a table, rejecting columns whose length differs from the first.
    fn try_from(columns: Vec<Column>) -> std::result::Result<Self, Error> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != expected) {
                return Err(Error::MisalignedColumn {
                    column: bad.name.clone(),
                    rows: bad.values.len(),
                    expected,
                });
            }
        }
        Ok(Self { columns })
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CoincidenceTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let columns = Vec::<Column>::deserialize(deserializer)?;
        Self::try_from(columns).map_err(serde::de::Error::custom)
    }
}
