//! Record list editor
//!
//! Repeatable sub-records (pet fees, nearby places, utility providers) are
//! stored as `Option<Vec<T>>`: `None` until the first record is added and
//! again once the last one is deleted.

use super::error::IntakeError;

/// Append a record (`index == None`) or replace the record at `index`
pub fn save<T>(
    list: &mut Option<Vec<T>>,
    record: T,
    index: Option<usize>,
    kind: &'static str,
) -> Result<usize, IntakeError> {
    match index {
        None => {
            let items = list.get_or_insert_with(Vec::new);
            items.push(record);
            Ok(items.len() - 1)
        }
        Some(i) => {
            let slot = list
                .as_mut()
                .and_then(|items| items.get_mut(i))
                .ok_or(IntakeError::RecordIndex { kind, index: i })?;
            *slot = record;
            Ok(i)
        }
    }
}

/// Remove the record at `index`, collapsing an emptied list to `None`
pub fn delete<T>(
    list: &mut Option<Vec<T>>,
    index: usize,
    kind: &'static str,
) -> Result<T, IntakeError> {
    let items = list
        .as_mut()
        .filter(|items| index < items.len())
        .ok_or(IntakeError::RecordIndex { kind, index })?;
    let removed = items.remove(index);
    if items.is_empty() {
        *list = None;
    }
    Ok(removed)
}

/// Record at `index`, if any
pub fn get<T>(list: &Option<Vec<T>>, index: usize) -> Option<&T> {
    list.as_ref().and_then(|items| items.get(index))
}
