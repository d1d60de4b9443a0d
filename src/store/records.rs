//! Main-table operations.
//!
//! The main group holds one entry per user: its own id plus the three
//! dictionary ids for first name, second name and birth date. All access
//! is a linear scan in insertion order.

use crate::domain::UserFilter;
use crate::errors::{AppError, AppResult};
use crate::store::dictionary;
use crate::store::document::{Attribute, RecordEntry, StoreDocument};

/// Append a new record linking the three resolved dictionary ids
pub fn insert(doc: &mut StoreDocument, fid: u32, sid: u32, bid: u32) -> AppResult<u32> {
    let id = doc.main_ids.allocate()?;
    doc.main.push(RecordEntry {
        first_name_id: fid,
        second_name_id: sid,
        birth_date_id: bid,
        id,
    });
    tracing::debug!(id, fid, sid, bid, "record inserted");
    Ok(id)
}

/// Dictionary ids of the record with the given id
pub fn find(doc: &StoreDocument, id: u32) -> AppResult<(u32, u32, u32)> {
    doc.main
        .iter()
        .find(|record| record.id == id)
        .map(|record| (record.first_name_id, record.second_name_id, record.birth_date_id))
        .ok_or_else(|| {
            tracing::debug!(id, "no record with this id");
            AppError::NotFound
        })
}

/// All record ids in scan order
pub fn all_ids(doc: &StoreDocument) -> Vec<u32> {
    doc.main.iter().map(|record| record.id).collect()
}

/// Ids of records whose stored values match every supplied filter
/// attribute. Unsupplied attributes are not resolved at all; an empty
/// filter matches every record.
pub fn ids_matching(doc: &StoreDocument, filter: &UserFilter) -> AppResult<Vec<u32>> {
    let criteria = [
        (Attribute::FirstName, filter.first_name.as_deref()),
        (Attribute::SecondName, filter.second_name.as_deref()),
        (Attribute::BirthDate, filter.birth_date.as_deref()),
    ];

    let mut ids = Vec::new();
    'records: for record in &doc.main {
        for (attr, wanted) in criteria {
            if let Some(wanted) = wanted {
                let stored = dictionary::value_of(doc, attr, record.link(attr))?;
                if stored != wanted {
                    continue 'records;
                }
            }
        }
        ids.push(record.id);
    }
    Ok(ids)
}

/// Point the record's foreign-id field for `attr` at a new dictionary id
pub fn relink(doc: &mut StoreDocument, id: u32, attr: Attribute, new_id: u32) -> AppResult<()> {
    let record = doc
        .main
        .iter_mut()
        .find(|record| record.id == id)
        .ok_or(AppError::NotFound)?;
    record.set_link(attr, new_id);
    tracing::debug!(id, group = %attr, new_id, "record relinked");
    Ok(())
}

/// How many records reference dictionary id `id` through the `attr` field
pub fn reference_count(records: &[RecordEntry], attr: Attribute, id: u32) -> usize {
    records.iter().filter(|record| record.link(attr) == id).count()
}

/// Remove the record and recycle its id.
///
/// Record ids are unique, so the delete-with-check rule degenerates to a
/// presence check: a missing record is NotFound, an existing one is the
/// sole holder of its id and is always removed.
pub fn remove(doc: &mut StoreDocument, id: u32) -> AppResult<()> {
    let index = doc
        .main
        .iter()
        .position(|record| record.id == id)
        .ok_or(AppError::NotFound)?;
    doc.main.remove(index);
    doc.main_ids.release(id)?;
    tracing::debug!(id, "record removed, id recycled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, fid: u32) -> RecordEntry {
        RecordEntry {
            first_name_id: fid,
            second_name_id: 1,
            birth_date_id: 1,
            id,
        }
    }

    #[test]
    fn reference_count_counts_only_the_requested_field() {
        let records = vec![record(1, 7), record(2, 7), record(3, 8)];
        assert_eq!(reference_count(&records, Attribute::FirstName, 7), 2);
        assert_eq!(reference_count(&records, Attribute::FirstName, 8), 1);
        assert_eq!(reference_count(&records, Attribute::FirstName, 9), 0);
        // Same value under another field does not count
        assert_eq!(reference_count(&records, Attribute::SecondName, 7), 0);
    }

    #[test]
    fn insert_then_find() {
        let mut doc = StoreDocument::bootstrap();
        let id = insert(&mut doc, 10, 20, 30).unwrap();
        assert_eq!(id, 1);
        assert_eq!(find(&doc, id).unwrap(), (10, 20, 30));
        assert!(matches!(find(&doc, 99), Err(AppError::NotFound)));
    }

    #[test]
    fn remove_recycles_the_record_id() {
        let mut doc = StoreDocument::bootstrap();
        let first = insert(&mut doc, 1, 1, 1).unwrap();
        let second = insert(&mut doc, 1, 1, 1).unwrap();
        remove(&mut doc, first).unwrap();

        assert!(matches!(find(&doc, first), Err(AppError::NotFound)));
        assert!(find(&doc, second).is_ok());
        assert_eq!(doc.main_ids.free_ids(), &[first]);
        assert!(matches!(remove(&mut doc, first), Err(AppError::NotFound)));
    }

    #[test]
    fn relink_overwrites_one_field() {
        let mut doc = StoreDocument::bootstrap();
        let id = insert(&mut doc, 1, 2, 3).unwrap();
        relink(&mut doc, id, Attribute::SecondName, 9).unwrap();
        assert_eq!(find(&doc, id).unwrap(), (1, 9, 3));
        assert!(matches!(
            relink(&mut doc, 99, Attribute::SecondName, 9),
            Err(AppError::NotFound)
        ));
    }
}
