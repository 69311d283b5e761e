//! Relative abundance table: bins (rows) by samples (columns).

use crate::error::{PlError, Result};
use nalgebra::DMatrix;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Name of the bin identifier column when none is given.
pub const DEFAULT_INDEX_COLUMN: &str = "Bin";

/// A dense table of relative abundances.
///
/// Rows represent bins (taxa, OTUs, T-RFs), columns represent samples.
/// Every value is finite and non-negative; column sums are checked
/// separately by [`crate::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct AbundanceTable {
    /// Dense matrix (bins × samples)
    data: DMatrix<f64>,
    /// Bin identifiers (row names)
    bin_ids: Vec<String>,
    /// Sample identifiers (column names)
    sample_ids: Vec<String>,
}

impl AbundanceTable {
    /// Create a new AbundanceTable from a matrix and identifiers.
    pub fn new(data: DMatrix<f64>, bin_ids: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        let (nrows, ncols) = data.shape();
        if nrows != bin_ids.len() {
            return Err(PlError::DimensionMismatch {
                expected: nrows,
                actual: bin_ids.len(),
            });
        }
        if ncols != sample_ids.len() {
            return Err(PlError::DimensionMismatch {
                expected: ncols,
                actual: sample_ids.len(),
            });
        }
        for row in 0..nrows {
            for col in 0..ncols {
                let value = data[(row, col)];
                if !value.is_finite() || value < 0.0 {
                    return Err(PlError::InvalidAbundance {
                        value: value.to_string(),
                        row,
                        col,
                    });
                }
            }
        }
        Ok(Self {
            data,
            bin_ids,
            sample_ids,
        })
    }

    /// Build a table from per-sample columns.
    ///
    /// Each column must have one value per bin.
    pub fn from_columns(
        bin_ids: Vec<String>,
        sample_ids: Vec<String>,
        columns: &[Vec<f64>],
    ) -> Result<Self> {
        if columns.len() != sample_ids.len() {
            return Err(PlError::DimensionMismatch {
                expected: sample_ids.len(),
                actual: columns.len(),
            });
        }
        let n_bins = bin_ids.len();
        for column in columns {
            if column.len() != n_bins {
                return Err(PlError::DimensionMismatch {
                    expected: n_bins,
                    actual: column.len(),
                });
            }
        }
        let data = DMatrix::from_fn(n_bins, columns.len(), |row, col| columns[col][row]);
        Self::new(data, bin_ids, sample_ids)
    }

    /// Load an abundance table from a TSV file.
    ///
    /// Expected format:
    /// - First row: header naming the index column and every sample
    /// - Subsequent rows: one bin each, proportions in the sample columns
    ///
    /// The index column may appear anywhere in the header.
    pub fn from_tsv<P: AsRef<Path>>(path: P, index_column: &str) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, index_column)
    }

    /// Parse an abundance table from any TSV reader.
    pub fn from_reader<R: Read>(reader: R, index_column: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let index_pos = headers
            .iter()
            .position(|h| h.trim() == index_column)
            .ok_or_else(|| PlError::MissingColumn(index_column.to_string()))?;

        let sample_ids: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index_pos)
            .map(|(_, h)| h.trim().to_string())
            .collect();
        if sample_ids.is_empty() {
            return Err(PlError::EmptyData(
                "TSV must have at least one sample column".to_string(),
            ));
        }
        let n_samples = sample_ids.len();

        // Row-major values, reshaped once all rows are read
        let mut values: Vec<f64> = Vec::new();
        let mut bin_ids: Vec<String> = Vec::new();

        for (row_idx, record) in rdr.records().enumerate() {
            let record = record?;
            let mut col_idx = 0;
            for (pos, field) in record.iter().enumerate() {
                if pos == index_pos {
                    bin_ids.push(field.trim().to_string());
                    continue;
                }
                let value: f64 = field.trim().parse().map_err(|_| PlError::InvalidAbundance {
                    value: field.to_string(),
                    row: row_idx,
                    col: col_idx,
                })?;
                values.push(value);
                col_idx += 1;
            }
        }

        let n_bins = bin_ids.len();
        if n_bins == 0 {
            return Err(PlError::EmptyData("No bins in TSV".to_string()));
        }
        if values.len() != n_bins * n_samples {
            return Err(PlError::DimensionMismatch {
                expected: n_bins * n_samples,
                actual: values.len(),
            });
        }

        let data = DMatrix::from_row_slice(n_bins, n_samples, &values);
        Self::new(data, bin_ids, sample_ids)
    }

    /// Write the table to a TSV file with a `Bin` index column.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;

        let mut header = Vec::with_capacity(self.n_samples() + 1);
        header.push(DEFAULT_INDEX_COLUMN.to_string());
        header.extend(self.sample_ids.iter().cloned());
        wtr.write_record(&header)?;

        for (row, bin_id) in self.bin_ids.iter().enumerate() {
            let mut record = Vec::with_capacity(self.n_samples() + 1);
            record.push(bin_id.clone());
            record.extend((0..self.n_samples()).map(|col| self.get(row, col).to_string()));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Get the value at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    /// Number of bins (rows).
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.data.nrows()
    }

    /// Number of samples (columns).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn bin_ids(&self) -> &[String] {
        &self.bin_ids
    }

    #[inline]
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Get the underlying matrix.
    #[inline]
    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Position of a sample by name.
    pub fn sample_index(&self, sample_id: &str) -> Option<usize> {
        self.sample_ids.iter().position(|s| s == sample_id)
    }

    /// Values of one bin across all samples.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.data.row(row).iter().copied().collect()
    }

    /// Values of one sample across all bins, in row order.
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.data.column(col).iter().copied().collect()
    }

    /// Total abundance per bin.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.n_bins())
            .map(|row| self.data.row(row).iter().sum())
            .collect()
    }

    /// Total abundance per sample.
    pub fn col_sums(&self) -> Vec<f64> {
        (0..self.n_samples())
            .map(|col| self.data.column(col).iter().sum())
            .collect()
    }

    /// Subset the table to the given bins (by index), in the given order.
    pub fn subset_bins(&self, indices: &[usize]) -> Result<Self> {
        for &idx in indices {
            if idx >= self.n_bins() {
                return Err(PlError::InvalidParameter(format!(
                    "Bin index {} out of bounds",
                    idx
                )));
            }
        }
        let data = self.data.select_rows(indices);
        let bin_ids = indices.iter().map(|&i| self.bin_ids[i].clone()).collect();
        Self::new(data, bin_ids, self.sample_ids.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_table() -> AbundanceTable {
        // 4 bins × 3 samples, bin_D absent everywhere
        let bin_ids = vec![
            "bin_A".to_string(),
            "bin_B".to_string(),
            "bin_C".to_string(),
            "bin_D".to_string(),
        ];
        let sample_ids = vec!["S1".to_string(), "S2".to_string(), "S3".to_string()];
        let columns = vec![
            vec![0.5, 0.3, 0.2, 0.0],
            vec![0.25, 0.25, 0.5, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ];
        AbundanceTable::from_columns(bin_ids, sample_ids, &columns).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let table = create_test_table();
        assert_eq!(table.n_bins(), 4);
        assert_eq!(table.n_samples(), 3);
    }

    #[test]
    fn test_from_columns_layout() {
        let table = create_test_table();
        assert_relative_eq!(table.get(0, 0), 0.5);
        assert_relative_eq!(table.get(2, 1), 0.5);
        assert_relative_eq!(table.get(0, 2), 1.0);
        assert_eq!(table.column(1), vec![0.25, 0.25, 0.5, 0.0]);
        assert_eq!(table.row(0), vec![0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_sums() {
        let table = create_test_table();
        for sum in table.col_sums() {
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
        let rows = table.row_sums();
        assert_relative_eq!(rows[0], 1.75, epsilon = 1e-12);
        assert_eq!(rows[3], 0.0);
    }

    #[test]
    fn test_rejects_negative_values() {
        let result = AbundanceTable::from_columns(
            vec!["a".into(), "b".into()],
            vec!["S1".into()],
            &[vec![1.5, -0.5]],
        );
        assert!(matches!(
            result,
            Err(PlError::InvalidAbundance { row: 1, col: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_dimensions() {
        let result = AbundanceTable::from_columns(
            vec!["a".into(), "b".into()],
            vec!["S1".into(), "S2".into()],
            &[vec![1.0, 0.0]],
        );
        assert!(matches!(result, Err(PlError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_from_reader_index_column_anywhere() {
        let tsv = "S1\tBin\tS2\n0.6\tx\t0.1\n0.4\ty\t0.9\n";
        let table = AbundanceTable::from_reader(tsv.as_bytes(), "Bin").unwrap();
        assert_eq!(table.bin_ids(), &["x", "y"]);
        assert_eq!(table.sample_ids(), &["S1", "S2"]);
        assert_relative_eq!(table.get(1, 1), 0.9);
    }

    #[test]
    fn test_from_reader_missing_index() {
        let tsv = "Taxon\tS1\nx\t1.0\n";
        let result = AbundanceTable::from_reader(tsv.as_bytes(), "Bin");
        assert!(matches!(result, Err(PlError::MissingColumn(ref c)) if c == "Bin"));
    }

    #[test]
    fn test_from_reader_bad_value() {
        let tsv = "Bin\tS1\tS2\nx\t0.5\tabc\n";
        let result = AbundanceTable::from_reader(tsv.as_bytes(), "Bin");
        assert!(matches!(
            result,
            Err(PlError::InvalidAbundance { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn test_from_reader_no_samples() {
        let tsv = "Bin\nx\n";
        let result = AbundanceTable::from_reader(tsv.as_bytes(), "Bin");
        assert!(matches!(result, Err(PlError::EmptyData(_))));
    }

    #[test]
    fn test_from_reader_no_bins() {
        let tsv = "Bin\tS1\n";
        let result = AbundanceTable::from_reader(tsv.as_bytes(), "Bin");
        assert!(matches!(result, Err(PlError::EmptyData(_))));
    }

    #[test]
    fn test_tsv_roundtrip() {
        let table = create_test_table();

        let temp_file = NamedTempFile::new().unwrap();
        table.to_tsv(temp_file.path()).unwrap();

        let loaded = AbundanceTable::from_tsv(temp_file.path(), DEFAULT_INDEX_COLUMN).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_from_tsv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Bin\tsoil\tgut").unwrap();
        writeln!(file, "T-RF_54\t0.7\t0.2").unwrap();
        writeln!(file, "T-RF_61\t0.3\t0.8").unwrap();
        file.flush().unwrap();

        let table = AbundanceTable::from_tsv(file.path(), "Bin").unwrap();
        assert_eq!(table.n_bins(), 2);
        assert_eq!(table.sample_index("gut"), Some(1));
        assert_eq!(table.sample_index("air"), None);
    }

    #[test]
    fn test_subset_bins() {
        let table = create_test_table();
        let subset = table.subset_bins(&[0, 2]).unwrap();

        assert_eq!(subset.n_bins(), 2);
        assert_eq!(subset.n_samples(), 3);
        assert_eq!(subset.bin_ids(), &["bin_A", "bin_C"]);
        assert_relative_eq!(subset.get(1, 1), 0.5);

        assert!(table.subset_bins(&[7]).is_err());
    }

    #[test]
    fn test_subset_bins_empty() {
        let table = create_test_table();
        let subset = table.subset_bins(&[]).unwrap();
        assert_eq!(subset.n_bins(), 0);
        assert_eq!(subset.n_samples(), 3);
        assert_eq!(subset.col_sums(), vec![0.0, 0.0, 0.0]);
    }
}
