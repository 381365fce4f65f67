//! Min-max feature scaling
//!
//! A scaler is fit once over a candidate pool and then used, unchanged, for
//! both the pool rows and any external query point. Every call fits a new one.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScalerError {
    #[error("cannot fit a scaler on an empty pool")]
    EmptyInput,

    #[error("row has {found} features, scaler was fit on {expected}")]
    WidthMismatch { expected: usize, found: usize },

    #[error("non-finite value in feature {0}")]
    NonFinite(usize),
}

/// Per-feature min/max fitted over a pool, mapping values into `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl MinMaxScaler {
    /// Compute min and max of every feature over all rows
    pub fn fit<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, ScalerError> {
        let first = rows.first().ok_or(ScalerError::EmptyInput)?.as_ref();
        let width = first.len();
        if width == 0 {
            return Err(ScalerError::EmptyInput);
        }

        let mut min = vec![f64::INFINITY; width];
        let mut max = vec![f64::NEG_INFINITY; width];

        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ScalerError::WidthMismatch {
                    expected: width,
                    found: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ScalerError::NonFinite(j));
                }
                min[j] = min[j].min(value);
                max[j] = max[j].max(value);
            }
        }

        Ok(Self { min, max })
    }

    pub fn n_features(&self) -> usize {
        self.min.len()
    }

    /// Scale one row with the fitted range. Values outside the fitted range
    /// land outside `[0, 1]`; a constant feature always scales to 0.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ScalerError> {
        if row.len() != self.n_features() {
            return Err(ScalerError::WidthMismatch {
                expected: self.n_features(),
                found: row.len(),
            });
        }

        row.iter()
            .enumerate()
            .map(|(j, &value)| {
                if !value.is_finite() {
                    return Err(ScalerError::NonFinite(j));
                }
                let range = self.max[j] - self.min[j];
                if range == 0.0 {
                    Ok(0.0)
                } else {
                    Ok((value - self.min[j]) / range)
                }
            })
            .collect()
    }

    pub fn transform_all<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<Vec<f64>>, ScalerError> {
        rows.iter().map(|row| self.transform(row.as_ref())).collect()
    }
}
