//! Attribute dictionary operations.
//!
//! Each dictionary maps distinct attribute values to stable ids. Values
//! are never stored twice: `insert_if_absent` resolves an existing id
//! before allocating a new one, and `release_if_unreferenced` removes an
//! entry only once the last main-table record pointing at it is gone.
//! Lookups are linear scans with exact string equality.

use crate::errors::{AppError, AppResult};
use crate::store::document::{Attribute, DictEntry, StoreDocument};
use crate::store::records;

/// Id of the first entry whose value equals `value`, if any
pub fn lookup(doc: &StoreDocument, attr: Attribute, value: &str) -> Option<u32> {
    doc.dictionary(attr)
        .iter()
        .find(|entry| entry.value == value)
        .map(|entry| entry.id)
}

/// Resolve `value` to its id, inserting a new entry when absent.
///
/// Existing values keep their id, which is what links records sharing an
/// attribute value to the same entry.
pub fn insert_if_absent(doc: &mut StoreDocument, attr: Attribute, value: &str) -> AppResult<u32> {
    if let Some(id) = lookup(doc, attr, value) {
        tracing::debug!(group = %attr, id, "value already present");
        return Ok(id);
    }

    let id = doc.pool_mut(attr).allocate()?;
    doc.dictionary_mut(attr).push(DictEntry {
        value: value.to_string(),
        id,
    });
    tracing::debug!(group = %attr, id, "value inserted");
    Ok(id)
}

/// Value stored under `id` in the given dictionary
pub fn value_of(doc: &StoreDocument, attr: Attribute, id: u32) -> AppResult<&str> {
    doc.dictionary(attr)
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.value.as_str())
        .ok_or_else(|| {
            tracing::warn!(group = %attr, id, "dangling dictionary reference");
            AppError::NotFound
        })
}

/// Remove the entry under `id` once no main-table record references it.
///
/// The caller holds a record that links (or linked) this id, so the
/// reference count decides the outcome:
/// - 0: the link is dangling, the document is inconsistent;
/// - more than 1: other records still share the value, keep the entry;
/// - exactly 1: the caller is the last holder, remove and recycle the id.
pub fn release_if_unreferenced(
    doc: &mut StoreDocument,
    attr: Attribute,
    id: u32,
) -> AppResult<()> {
    let count = records::reference_count(&doc.main, attr, id);
    match count {
        0 => {
            tracing::error!(group = %attr, id, "no record references this entry");
            return Err(AppError::NotFound);
        }
        1 => {}
        shared => {
            tracing::debug!(group = %attr, id, shared, "value still shared, keeping entry");
            return Ok(());
        }
    }

    let entries = doc.dictionary_mut(attr);
    let position = entries.iter().position(|entry| entry.id == id);
    match position {
        Some(index) => {
            entries.remove(index);
            doc.pool_mut(attr).release(id)?;
            tracing::debug!(group = %attr, id, "entry removed, id recycled");
            Ok(())
        }
        None => {
            tracing::error!(group = %attr, id, "referenced entry missing from dictionary");
            Err(AppError::NotFound)
        }
    }
}
