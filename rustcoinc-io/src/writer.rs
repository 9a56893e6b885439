//! Writers for coincidence tables and count rates.

use crate::Result;
use rustcoinc_algorithms::CountRate;
use rustcoinc_core::CoincidenceTable;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writer for processed coincidence output.
///
/// Writes to a file by default; [`TableFileWriter::from_writer`] wraps any
/// other sink such as stdout.
pub struct TableFileWriter<W: Write = BufWriter<File>> {
    writer: W,
}

impl TableFileWriter {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer })
    }
}

impl<W: Write> TableFileWriter<W> {
    /// Wraps an existing writer.
    pub fn from_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the table as CSV with the column names as header.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_table_csv(&mut self, table: &CoincidenceTable) -> Result<()> {
        let header: Vec<&str> = table.column_names().collect();
        writeln!(self.writer, "{}", header.join(","))?;

        for row in (0..table.num_rows()).filter_map(|index| table.row(index)) {
            let line: Vec<String> = row.iter().map(f64::to_string).collect();
            writeln!(self.writer, "{}", line.join(","))?;
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Writes the table as a JSON list of `{"name", "values"}` columns.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_table_json(&mut self, table: &CoincidenceTable) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, table)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes a count rate as CSV, one bin per row.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_rate_csv(&mut self, rate: &CountRate) -> Result<()> {
        writeln!(self.writer, "bin_start,bin_end,rate")?;
        for (start, end, value) in rate.bins() {
            writeln!(self.writer, "{start},{end},{value}")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// Returns an error if the underlying sink fails to flush.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
