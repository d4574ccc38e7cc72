//! groupfit: grouped linear-regression batch prediction over tabular records.
//!
//! Given flat records sharing grouping-key fields, an independent field, and
//! a dependent field, [`batch_predict`] partitions the records by key, fits
//! an ordinary-least-squares line per partition, and emits predicted
//! dependent values for a caller-supplied set of new independent values.
//!
//! # Key Types
//!
//! - [`Record`] / [`Value`] - flat tabular rows
//! - [`Group`] - columnar group (key scalars + parallel value columns)
//! - [`LinearFit`] - fitted slope/intercept with `predict`
//!
//! # Operations
//!
//! - [`project`] - strip records down to an allowed field set
//! - [`group`] / [`ungroup`] - partition records into columnar groups and back
//! - [`batch_predict`] - the composed pipeline
//!
//! Everything is synchronous and pure with respect to its inputs: records go
//! in by reference, fresh records come out, nothing is shared across calls.
//!
//! # Example
//!
//! ```
//! use groupfit::{batch_predict, Record};
//!
//! let records = vec![
//!     Record::new().with_field("branch", "A").with_field("period", 1.0).with_field("sales", 2.0),
//!     Record::new().with_field("branch", "A").with_field("period", 2.0).with_field("sales", 4.0),
//!     Record::new().with_field("branch", "A").with_field("period", 3.0).with_field("sales", 6.0),
//! ];
//!
//! let preds = batch_predict(&records, &["branch"], "period", "sales", &[7.0, 8.0]).unwrap();
//! assert_eq!(preds[0].get("sales").and_then(|v| v.as_num()), Some(14.0));
//! assert_eq!(preds[1].get("sales").and_then(|v| v.as_num()), Some(16.0));
//! ```

pub mod frame;
pub mod io;
pub mod predict;
pub mod record;
pub mod regression;
pub mod testing;

pub use frame::{group, project, ungroup, FrameError, Group};
pub use predict::{batch_predict, PredictError};
pub use record::{Record, Value};
pub use regression::{LinearFit, RegressionError};
