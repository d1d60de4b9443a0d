//! Record store façade.
//!
//! Composes the id pools, attribute dictionaries and main table into the
//! six CRUD operations the service layer consumes. Every mutating call
//! rewrites the whole storage file before returning; a failed write does
//! NOT roll the in-memory document back, so after a Persistence error
//! memory is ahead of disk and the store should be treated as degraded.

use std::path::{Path, PathBuf};

use crate::domain::{User, UserFilter, UserPatch};
use crate::errors::{AppError, AppResult};
use crate::store::dictionary;
use crate::store::document::{Attribute, StoreDocument};
use crate::store::records;

/// Single-file user store. One instance owns the file exclusively;
/// concurrent instances on the same path will overwrite each other.
pub struct RecordStore {
    path: PathBuf,
    doc: StoreDocument,
}

impl RecordStore {
    /// Open the store at `path`: parse the file when it exists, otherwise
    /// bootstrap an empty document and write it out.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let doc = if path.exists() {
            let doc = StoreDocument::load(&path)?;
            tracing::info!(path = %path.display(), users = doc.main.len(), "storage opened");
            doc
        } else {
            let doc = StoreDocument::bootstrap();
            doc.persist(&path)
                .map_err(|e| AppError::init(format!("cannot create storage file: {}", e)))?;
            tracing::info!(path = %path.display(), "storage bootstrapped");
            doc
        };
        Ok(Self { path, doc })
    }

    /// Store a new user, deduplicating each attribute against the
    /// dictionaries, and return the new record id.
    pub fn create(&mut self, user: &User) -> AppResult<u32> {
        let fid = dictionary::insert_if_absent(&mut self.doc, Attribute::FirstName, &user.first_name)?;
        let sid =
            dictionary::insert_if_absent(&mut self.doc, Attribute::SecondName, &user.second_name)?;
        let bid = dictionary::insert_if_absent(&mut self.doc, Attribute::BirthDate, &user.birth_date)?;

        let id = records::insert(&mut self.doc, fid, sid, bid)?;
        self.persist()?;

        tracing::debug!(id, "user created");
        Ok(id)
    }

    /// All record ids, in scan order
    pub fn ids(&self) -> Vec<u32> {
        records::all_ids(&self.doc)
    }

    /// Record ids matching the supplied filter attributes; an empty
    /// filter lists everything.
    pub fn ids_matching(&self, filter: &UserFilter) -> AppResult<Vec<u32>> {
        if filter.is_empty() {
            return Ok(self.ids());
        }
        records::ids_matching(&self.doc, filter)
    }

    /// Reconstruct the full user behind a record id
    pub fn get(&self, id: u32) -> AppResult<User> {
        let (fid, sid, bid) = records::find(&self.doc, id)?;

        let first_name = dictionary::value_of(&self.doc, Attribute::FirstName, fid)?;
        let second_name = dictionary::value_of(&self.doc, Attribute::SecondName, sid)?;
        let birth_date = dictionary::value_of(&self.doc, Attribute::BirthDate, bid)?;

        Ok(User::new(first_name, second_name, birth_date))
    }

    /// Apply a partial update. For each attribute present in the patch the
    /// old dictionary entry is released (dropped when this record was its
    /// last holder), the new value is resolved or inserted, and the record
    /// is relinked. Untouched attributes keep their links.
    pub fn update(&mut self, id: u32, patch: &UserPatch) -> AppResult<User> {
        let (fid, sid, bid) = records::find(&self.doc, id)?;

        let changes = [
            (Attribute::FirstName, fid, patch.first_name.as_deref()),
            (Attribute::SecondName, sid, patch.second_name.as_deref()),
            (Attribute::BirthDate, bid, patch.birth_date.as_deref()),
        ];

        for (attr, old_id, new_value) in changes {
            if let Some(new_value) = new_value {
                dictionary::release_if_unreferenced(&mut self.doc, attr, old_id)?;
                let new_id = dictionary::insert_if_absent(&mut self.doc, attr, new_value)?;
                records::relink(&mut self.doc, id, attr, new_id)?;
            }
        }

        self.persist()?;

        let user = self.get(id)?;
        tracing::debug!(id, "user updated");
        Ok(user)
    }

    /// Delete a user: release all three dictionary links, then the record
    /// itself.
    pub fn delete(&mut self, id: u32) -> AppResult<()> {
        let (fid, sid, bid) = records::find(&self.doc, id)?;

        dictionary::release_if_unreferenced(&mut self.doc, Attribute::FirstName, fid)?;
        dictionary::release_if_unreferenced(&mut self.doc, Attribute::SecondName, sid)?;
        dictionary::release_if_unreferenced(&mut self.doc, Attribute::BirthDate, bid)?;
        records::remove(&mut self.doc, id)?;

        self.persist()?;

        tracing::debug!(id, "user deleted");
        Ok(())
    }

    /// Read-only view of the in-memory document (inspection and tests)
    pub fn document(&self) -> &StoreDocument {
        &self.doc
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> AppResult<()> {
        self.doc.persist(&self.path)
    }
}
