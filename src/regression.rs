//! Ordinary-least-squares line fitting.
//!
//! [`LinearFit`] fits slope and intercept from paired observations using the
//! closed form
//!
//! ```text
//! slope     = Σ(xᵢ − x̄)(yᵢ − ȳ) / Σ(xᵢ − x̄)²
//! intercept = ȳ − slope · x̄
//! ```
//!
//! The fit is an immutable value; [`LinearFit::predict`] is a read-only
//! evaluation and safe to call from anywhere.
//!
//! # Degenerate x
//!
//! When every x is identical the denominator is zero and the slope comes out
//! non-finite (`±inf` or `NaN`). This is documented behavior, not an error:
//! the fit succeeds and predictions are non-finite.

use ndarray::{Array1, ArrayView1};

/// Regression input validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegressionError {
    /// x and y sequences have different lengths.
    #[error("x and y must have the same length, got {x_len} and {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// No observations at all.
    #[error("cannot fit a line to empty input")]
    Empty,

    /// Exactly one observation; a line needs at least two points.
    #[error("cannot determine a line from a single observation")]
    InsufficientData,
}

/// A fitted line: slope and intercept.
///
/// # Example
///
/// ```
/// use groupfit::LinearFit;
/// use ndarray::array;
///
/// let xs = array![1.0, 2.0, 3.0];
/// let ys = array![2.0, 4.0, 6.0];
/// let fit = LinearFit::fit(xs.view(), ys.view()).unwrap();
///
/// assert_eq!(fit.predict(4.0), 8.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
}

impl LinearFit {
    /// Fit a line to paired observations.
    ///
    /// # Errors
    ///
    /// - [`RegressionError::LengthMismatch`] if the sequences differ in
    ///   length.
    /// - [`RegressionError::Empty`] if they are empty.
    /// - [`RegressionError::InsufficientData`] on a single observation.
    ///
    /// Distinctness of x values is not validated; all-identical x yields a
    /// non-finite slope (see module docs).
    pub fn fit(xs: ArrayView1<'_, f64>, ys: ArrayView1<'_, f64>) -> Result<Self, RegressionError> {
        if xs.len() != ys.len() {
            return Err(RegressionError::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(RegressionError::Empty);
        }
        if xs.len() == 1 {
            return Err(RegressionError::InsufficientData);
        }

        let x_mean = xs.mean().ok_or(RegressionError::Empty)?;
        let y_mean = ys.mean().ok_or(RegressionError::Empty)?;

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let dx = x - x_mean;
            sxy += dx * (y - y_mean);
            sxx += dx * dx;
        }

        // sxx == 0 (constant x) deliberately flows through as a non-finite
        // slope rather than an error.
        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        Ok(Self { slope, intercept })
    }

    /// Predicted y for a new x.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Predicted y for each new x, in order.
    pub fn predict_many(&self, xs: ArrayView1<'_, f64>) -> Array1<f64> {
        xs.mapv(|x| self.predict(x))
    }

    /// Fitted slope.
    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Fitted intercept.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}
