//! Labelled CSV loading.
//!
//! Row format: `label,f1,f2,...,fN` where `label` is a non-negative integer
//! class index and every feature is numeric. Features are divided by
//! `CsvOptions::scale` (255 for 8-bit pixel data) and the label is one-hot
//! encoded into `CsvOptions::n_classes` outputs.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsvOptions {
    pub n_classes: usize,
    pub scale: f64,
    pub has_header: bool,
}

impl Default for CsvOptions {
    /// MNIST CSV layout: 10 classes, 0–255 pixels, header row.
    fn default() -> Self {
        CsvOptions {
            n_classes: 10,
            scale: 255.0,
            has_header: true,
        }
    }
}

pub fn load_labelled_csv<R: Read>(reader: R, options: &CsvOptions) -> Result<Dataset> {
    if !(options.scale.is_finite() && options.scale != 0.0) {
        return Err(Error::config(format!("feature scale must be finite and non-zero, got {}", options.scale)));
    }

    let mut csv_reader = ::csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut features: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<usize> = Vec::new();

    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row_num = row_idx + 1;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < 2 {
            return Err(Error::Data(format!(
                "row {row_num}: expected a label and at least one feature, got {} field(s)",
                record.len()
            )));
        }

        let label_cell = &record[0];
        let label: usize = label_cell.parse().map_err(|_| {
            Error::Data(format!("row {row_num}: class label '{label_cell}' is not a non-negative integer"))
        })?;

        let feats = record.iter().skip(1)
            .map(|cell| {
                cell.parse::<f64>()
                    .map(|v| v / options.scale)
                    .map_err(|_| Error::Data(format!("row {row_num}: '{cell}' is not a valid number")))
            })
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = features.first() {
            if first.len() != feats.len() {
                return Err(Error::Data(format!(
                    "row {row_num}: feature count {} does not match first row's {}",
                    feats.len(),
                    first.len()
                )));
            }
        }

        features.push(feats);
        labels.push(label);
    }

    if features.is_empty() {
        return Err(Error::Data("CSV contains no data rows".into()));
    }
    debug!(rows = features.len(), features = features[0].len(), "parsed labelled CSV");

    Dataset::from_labelled(features, labels, options.n_classes)
}

pub fn load_labelled_csv_path<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = load_labelled_csv(BufReader::new(file), options)?;
    info!(path = %path.display(), examples = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// The XOR truth table: 2 inputs, 1 output in {0, 1}.
pub fn builtin_xor() -> Dataset {
    let rows = [([0.0, 0.0], 0), ([0.0, 1.0], 1), ([1.0, 0.0], 1), ([1.0, 1.0], 0)];
    Dataset {
        inputs: rows.iter().map(|(x, _)| Matrix::column(x.to_vec())).collect(),
        targets: rows.iter().map(|&(_, y)| Matrix::column(vec![y as f64])).collect(),
        labels: rows.iter().map(|&(_, y)| y).collect(),
    }
}
