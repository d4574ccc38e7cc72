//! Grouped batch prediction.
//!
//! [`batch_predict`] is the whole pipeline: project the records down to the
//! fields that matter, group them by key, drop groups too small to fit a
//! line, fit an OLS line per group, evaluate it at the caller's new x values,
//! and flatten the predictions back into records.

use ndarray::Array1;

use crate::frame::{group, project, ungroup, FrameError, Group};
use crate::record::{Record, Value};
use crate::regression::{LinearFit, RegressionError};

/// Batch prediction error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictError {
    /// Grouping failed.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Line fitting failed.
    #[error(transparent)]
    Regression(#[from] RegressionError),

    /// The x or y column is absent from a group (no record of the group
    /// carried the field).
    #[error("field `{field}` is missing from group {group}")]
    MissingColumn { field: String, group: usize },

    /// The x or y column holds a string value.
    #[error("field `{field}` holds a non-numeric value")]
    NonNumericValue { field: String },
}

/// Fit a line per group of `records` and predict `y_field` at each of
/// `new_xs`.
///
/// Records are projected down to `key_fields` ∪ {`x_field`, `y_field`},
/// grouped by `key_fields`, and groups with fewer than two observations are
/// silently dropped (they cannot determine a line). Each surviving group is
/// fitted on its x/y columns and evaluated at every value of `new_xs`, in
/// order — duplicates in `new_xs` each produce their own prediction.
///
/// Returns one record per (surviving group × new x), in group-then-x order,
/// carrying the group's key fields, the new x as `x_field`, and the
/// prediction as `y_field`. If every group is dropped the result is empty,
/// not an error. Input records are never mutated.
///
/// # Example
///
/// ```
/// use groupfit::{batch_predict, Record};
///
/// let records = vec![
///     Record::new().with_field("branch", "A").with_field("period", 1.0).with_field("sales", 2.0),
///     Record::new().with_field("branch", "A").with_field("period", 2.0).with_field("sales", 4.0),
/// ];
/// let preds = batch_predict(&records, &["branch"], "period", "sales", &[3.0]).unwrap();
///
/// assert_eq!(preds.len(), 1);
/// assert_eq!(preds[0].get("sales").and_then(|v| v.as_num()), Some(6.0));
/// ```
///
/// # Errors
///
/// - [`PredictError::Frame`] on grouping problems (empty key list,
///   inconsistent field sets within a group).
/// - [`PredictError::MissingColumn`] / [`PredictError::NonNumericValue`] when
///   a surviving group's x or y column is unusable.
/// - [`PredictError::Regression`] is structurally unreachable here (the
///   small-group filter removes every input the regressor rejects) but
///   propagates all the same.
pub fn batch_predict(
    records: &[Record],
    key_fields: &[&str],
    x_field: &str,
    y_field: &str,
    new_xs: &[f64],
) -> Result<Vec<Record>, PredictError> {
    let mut allowed: Vec<&str> = key_fields.to_vec();
    allowed.push(x_field);
    allowed.push(y_field);

    let projected = project(records, &allowed);
    let groups = group(&projected, key_fields)?;

    let new_x_array = Array1::from_iter(new_xs.iter().copied());
    let new_x_column: Vec<Value> = new_xs.iter().map(|&x| Value::Num(x)).collect();

    let mut predicted = Vec::with_capacity(groups.len());
    for (idx, grp) in groups.iter().enumerate() {
        // Fewer than two observations cannot determine a line.
        if grp.len() < 2 {
            continue;
        }

        let xs = numeric_column(grp, x_field, idx)?;
        let ys = numeric_column(grp, y_field, idx)?;
        let fit = LinearFit::fit(xs.view(), ys.view())?;
        let preds = fit.predict_many(new_x_array.view());

        let keys = grp
            .keys()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        let columns = vec![
            (x_field.to_string(), new_x_column.clone()),
            (y_field.to_string(), preds.iter().map(|&y| Value::Num(y)).collect()),
        ];
        predicted.push(Group::new(keys, columns)?);
    }

    Ok(ungroup(&predicted))
}

/// Extract a group column as a numeric array.
fn numeric_column(grp: &Group, field: &str, group_idx: usize) -> Result<Array1<f64>, PredictError> {
    let col = grp.column(field).ok_or_else(|| PredictError::MissingColumn {
        field: field.to_string(),
        group: group_idx,
    })?;

    let mut values = Vec::with_capacity(col.len());
    for value in col {
        values.push(value.as_num().ok_or_else(|| PredictError::NonNumericValue {
            field: field.to_string(),
        })?);
    }
    Ok(Array1::from_vec(values))
}
