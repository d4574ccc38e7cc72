//! Columnar groups and the grouping/ungrouping transforms.
//!
//! [`group`] partitions flat records into [`Group`]s: one entry per distinct
//! grouping key, holding the key fields as scalars and every non-key field as
//! an ordered column aligned by member index (record-of-arrays). [`ungroup`]
//! is its inverse, and [`project`] strips records down to an allowed field
//! set.
//!
//! # Invariants
//!
//! - Groups come out in first-occurrence order of their keys; members keep
//!   encounter order within their columns.
//! - Every column of a [`Group`] has length equal to the member count. This
//!   is checked at construction; a record whose non-key field set disagrees
//!   with its group is an error rather than undefined behavior.
//! - Records missing a grouping-key field are silently excluded.
//!
//! Routing is by typed key values (see [`Value`] identity), not by a joined
//! string, so `Num(1.0)` and `Str("1")` never collide.

use std::collections::HashMap;

use crate::record::{Record, Value};

// =============================================================================
// Errors
// =============================================================================

/// Grouping/ungrouping validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FrameError {
    /// `group` requires at least one grouping-key field.
    #[error("at least one grouping-key field is required")]
    NoKeyFields,

    /// A record's non-key field set disagrees with its group's columns.
    #[error("field `{field}` is inconsistent across members of group {group}")]
    InconsistentFields { field: String, group: usize },

    /// A column handed to [`Group::new`] has the wrong length.
    #[error("column `{field}` has length {got}, expected {expected}")]
    ColumnLengthMismatch {
        field: String,
        expected: usize,
        got: usize,
    },
}

// =============================================================================
// Group
// =============================================================================

/// Typed routing key: the grouping-key values in key-field order.
///
/// Internal to the grouper; callers only ever see [`Group`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey(Vec<Value>);

/// One columnar group: grouping-key scalars plus parallel value columns.
///
/// Columns are kept in first-seen field order and always share one length,
/// the member count.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Grouping-key fields, scalar, in key-field order.
    keys: Vec<(String, Value)>,

    /// Non-key fields as ordered columns, first-seen order.
    columns: Vec<(String, Vec<Value>)>,

    /// Member count; every column has this length.
    len: usize,
}

impl Group {
    /// Build a group from key scalars and columns.
    ///
    /// The member count is taken from the first column (zero if there are no
    /// columns).
    ///
    /// # Errors
    ///
    /// [`FrameError::ColumnLengthMismatch`] if the columns disagree in
    /// length.
    pub fn new(
        keys: Vec<(String, Value)>,
        columns: Vec<(String, Vec<Value>)>,
    ) -> Result<Self, FrameError> {
        let len = columns.first().map(|(_, col)| col.len()).unwrap_or(0);
        for (field, col) in &columns {
            if col.len() != len {
                return Err(FrameError::ColumnLengthMismatch {
                    field: field.clone(),
                    expected: len,
                    got: col.len(),
                });
            }
        }
        Ok(Self { keys, columns, len })
    }

    /// Member count.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the group has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a grouping-key value by field name.
    pub fn key(&self, name: &str) -> Option<&Value> {
        self.keys.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate the grouping-key fields in key-field order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keys.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Get a column by field name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, col)| col.as_slice())
    }

    /// Iterate column names in first-seen order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Append one record's non-key fields to the columns.
    ///
    /// The record must carry exactly the fields this group's columns were
    /// established with (key fields aside).
    fn push_member(
        &mut self,
        record: &Record,
        key_fields: &[&str],
        group_idx: usize,
    ) -> Result<(), FrameError> {
        let mut appended = 0;
        for (name, value) in record.fields() {
            if key_fields.contains(&name) {
                continue;
            }
            match self.columns.iter_mut().find(|(n, _)| n == name) {
                Some((_, col)) => col.push(value.clone()),
                None => {
                    return Err(FrameError::InconsistentFields {
                        field: name.to_string(),
                        group: group_idx,
                    });
                }
            }
            appended += 1;
        }
        if appended != self.columns.len() {
            // Some established column got nothing from this record.
            let missing = self
                .columns
                .iter()
                .find(|(_, col)| col.len() == self.len)
                .map(|(n, _)| n.clone())
                .unwrap_or_default();
            return Err(FrameError::InconsistentFields {
                field: missing,
                group: group_idx,
            });
        }
        self.len += 1;
        Ok(())
    }
}

// =============================================================================
// Transforms
// =============================================================================

/// Strip each record down to the allowed fields.
///
/// Output has the same length and order as the input; fields absent from a
/// record are simply absent from its projection. Pure and idempotent.
pub fn project(records: &[Record], allowed_fields: &[&str]) -> Vec<Record> {
    records
        .iter()
        .map(|rec| {
            rec.fields()
                .filter(|(name, _)| allowed_fields.contains(name))
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect()
        })
        .collect()
}

/// Partition records into columnar groups by the given key fields.
///
/// Records are routed by their typed key values; a record missing any key
/// field is silently excluded. Groups come out in first-occurrence order.
///
/// # Errors
///
/// - [`FrameError::NoKeyFields`] if `key_fields` is empty.
/// - [`FrameError::InconsistentFields`] if a record's non-key field set
///   differs from the columns established by its group's first record.
pub fn group(records: &[Record], key_fields: &[&str]) -> Result<Vec<Group>, FrameError> {
    if key_fields.is_empty() {
        return Err(FrameError::NoKeyFields);
    }

    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    'records: for record in records {
        let mut key_values = Vec::with_capacity(key_fields.len());
        for &field in key_fields {
            match record.get(field) {
                Some(value) => key_values.push(value.clone()),
                // Missing key field: excluded from every group.
                None => continue 'records,
            }
        }
        let key = GroupKey(key_values);

        match index.get(&key) {
            Some(&idx) => {
                groups[idx].push_member(record, key_fields, idx)?;
            }
            None => {
                let keys = key_fields
                    .iter()
                    .zip(key.0.iter())
                    .map(|(&name, value)| (name.to_string(), value.clone()))
                    .collect();
                let columns = record
                    .fields()
                    .filter(|(name, _)| !key_fields.contains(name))
                    .map(|(name, value)| (name.to_string(), vec![value.clone()]))
                    .collect();
                index.insert(key, groups.len());
                groups.push(Group {
                    keys,
                    columns,
                    len: 1,
                });
            }
        }
    }

    Ok(groups)
}

/// Expand columnar groups back into flat records.
///
/// Inverse of [`group`]: each group yields one record per member index, key
/// scalars replicated, column values selected by index. Fields come out key
/// fields first, then columns in first-seen order. Infallible because
/// [`Group`] guarantees equal-length columns.
pub fn ungroup(groups: &[Group]) -> Vec<Record> {
    let total: usize = groups.iter().map(Group::len).sum();
    let mut records = Vec::with_capacity(total);

    for grp in groups {
        for i in 0..grp.len {
            let mut rec = Record::new();
            for (name, value) in &grp.keys {
                rec.insert(name.clone(), value.clone());
            }
            for (name, col) in &grp.columns {
                rec.insert(name.clone(), col[i].clone());
            }
            records.push(rec);
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new()
                .with_field("branch", "A")
                .with_field("period", 1.0)
                .with_field("sales", 2.0),
            Record::new()
                .with_field("branch", "B")
                .with_field("period", 2.0)
                .with_field("sales", 3.0),
            Record::new()
                .with_field("branch", "A")
                .with_field("period", 2.0)
                .with_field("sales", 4.0),
        ]
    }

    #[test]
    fn project_keeps_order_and_drops_extras() {
        let projected = project(&sample_records(), &["branch", "sales"]);

        assert_eq!(projected.len(), 3);
        for rec in &projected {
            assert!(rec.contains("branch"));
            assert!(rec.contains("sales"));
            assert!(!rec.contains("period"));
        }
        assert_eq!(projected[0].get("sales"), Some(&Value::Num(2.0)));
    }

    #[test]
    fn project_missing_fields_stay_absent() {
        let records = vec![Record::new().with_field("a", 1.0)];
        let projected = project(&records, &["a", "b"]);

        assert_eq!(projected[0].len(), 1);
        assert!(!projected[0].contains("b"));
    }

    #[test]
    fn project_is_idempotent() {
        let once = project(&sample_records(), &["branch", "sales"]);
        let twice = project(&once, &["branch", "sales"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn group_partitions_by_key_in_first_seen_order() {
        let groups = group(&sample_records(), &["branch"]).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key("branch"), Some(&Value::Str("A".into())));
        assert_eq!(groups[1].key("branch"), Some(&Value::Str("B".into())));

        assert_eq!(groups[0].len(), 2);
        assert_eq!(
            groups[0].column("period").unwrap(),
            &[Value::Num(1.0), Value::Num(2.0)]
        );
        assert_eq!(
            groups[0].column("sales").unwrap(),
            &[Value::Num(2.0), Value::Num(4.0)]
        );
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn group_composite_key_is_order_sensitive() {
        let records = vec![
            Record::new()
                .with_field("a", "x")
                .with_field("b", "y")
                .with_field("v", 1.0),
            Record::new()
                .with_field("a", "y")
                .with_field("b", "x")
                .with_field("v", 2.0),
        ];
        // Swapped key values must not collide.
        let groups = group(&records, &["a", "b"]).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn group_typed_keys_do_not_collide_with_strings() {
        let records = vec![
            Record::new().with_field("k", 1.0).with_field("v", 10.0),
            Record::new().with_field("k", "1").with_field("v", 20.0),
        ];
        let groups = group(&records, &["k"]).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn group_skips_records_missing_a_key_field() {
        let mut records = sample_records();
        records.push(Record::new().with_field("period", 9.0).with_field("sales", 9.0));

        let groups = group(&records, &["branch"]).unwrap();
        let members: usize = groups.iter().map(Group::len).sum();
        assert_eq!(members, 3);
    }

    #[test]
    fn group_no_key_fields_is_an_error() {
        let err = group(&sample_records(), &[]).unwrap_err();
        assert!(matches!(err, FrameError::NoKeyFields));
    }

    #[test]
    fn group_rejects_new_field_in_later_record() {
        let records = vec![
            Record::new().with_field("k", "a").with_field("x", 1.0),
            Record::new()
                .with_field("k", "a")
                .with_field("x", 2.0)
                .with_field("y", 3.0),
        ];
        let err = group(&records, &["k"]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::InconsistentFields { ref field, group: 0 } if field == "y"
        ));
    }

    #[test]
    fn group_rejects_missing_field_in_later_record() {
        let records = vec![
            Record::new()
                .with_field("k", "a")
                .with_field("x", 1.0)
                .with_field("y", 2.0),
            Record::new().with_field("k", "a").with_field("x", 2.0),
        ];
        let err = group(&records, &["k"]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::InconsistentFields { ref field, group: 0 } if field == "y"
        ));
    }

    #[test]
    fn group_new_validates_column_lengths() {
        let err = Group::new(
            vec![("k".into(), Value::Str("a".into()))],
            vec![
                ("x".into(), vec![Value::Num(1.0), Value::Num(2.0)]),
                ("y".into(), vec![Value::Num(1.0)]),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FrameError::ColumnLengthMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn ungroup_inverts_group() {
        let records = sample_records();
        let groups = group(&records, &["branch"]).unwrap();
        let flat = ungroup(&groups);

        assert_eq!(flat.len(), records.len());
        // Same multiset of records; group A's members come out adjacent.
        for rec in &records {
            assert!(flat.contains(rec));
        }
    }

    #[test]
    fn ungroup_replicates_key_scalars() {
        let groups = group(&sample_records(), &["branch"]).unwrap();
        let flat = ungroup(&groups);

        assert_eq!(flat[0].get("branch"), Some(&Value::Str("A".into())));
        assert_eq!(flat[1].get("branch"), Some(&Value::Str("A".into())));
        assert_eq!(flat[2].get("branch"), Some(&Value::Str("B".into())));
    }

    #[test]
    fn ungroup_group_without_columns_yields_key_only_records() {
        let records = vec![
            Record::new().with_field("k", "a"),
            Record::new().with_field("k", "a"),
        ];
        let groups = group(&records, &["k"]).unwrap();
        assert_eq!(groups[0].len(), 2);

        let flat = ungroup(&groups);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].len(), 1);
    }
}
