//! The store document: four data groups, four id pools, one file.
//!
//! The document is the whole persisted state. Users are normalized into a
//! main record table plus three deduplicating attribute dictionaries; each
//! table has an id-pool sidecar. Every mutating operation rewrites the
//! entire file, and reads never touch the file after the initial load.
//!
//! On-disk layout (JSON member names are part of the format):
//!
//! ```json
//! {
//!   "mainGroup":       [{"FID": 1, "SID": 1, "BID": 1, "ID": 1}],
//!   "firstNameGroup":  [{"value": "John", "ID": 1}],
//!   "secondNameGroup": [{"value": "Doe", "ID": 1}],
//!   "birthDateGroup":  [{"value": "1990-05-17", "ID": 1}],
//!   "MGID": [2], "FNID": [2], "SNID": [2], "BDID": [2]
//! }
//! ```
//!
//! Pool arrays carry the next-fresh counter in slot 0 and sorted freed
//! ids after it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::store::id_pool::IdPool;

/// One of the three deduplicated user attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    FirstName,
    SecondName,
    BirthDate,
}

impl Attribute {
    /// Group name as it appears in the storage file
    pub fn group_name(self) -> &'static str {
        match self {
            Attribute::FirstName => "firstNameGroup",
            Attribute::SecondName => "secondNameGroup",
            Attribute::BirthDate => "birthDateGroup",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.group_name())
    }
}

/// Dictionary entry: one distinct attribute value and its stable id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub value: String,
    #[serde(rename = "ID")]
    pub id: u32,
}

/// Main-table record: a user as a triple of dictionary ids plus its own id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    #[serde(rename = "FID")]
    pub first_name_id: u32,
    #[serde(rename = "SID")]
    pub second_name_id: u32,
    #[serde(rename = "BID")]
    pub birth_date_id: u32,
    #[serde(rename = "ID")]
    pub id: u32,
}

impl RecordEntry {
    /// Foreign id for the given attribute
    pub fn link(&self, attr: Attribute) -> u32 {
        match attr {
            Attribute::FirstName => self.first_name_id,
            Attribute::SecondName => self.second_name_id,
            Attribute::BirthDate => self.birth_date_id,
        }
    }

    /// Overwrite the foreign id for the given attribute in place
    pub fn set_link(&mut self, attr: Attribute, id: u32) {
        match attr {
            Attribute::FirstName => self.first_name_id = id,
            Attribute::SecondName => self.second_name_id = id,
            Attribute::BirthDate => self.birth_date_id = id,
        }
    }
}

/// In-memory form of the storage file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(rename = "mainGroup")]
    pub main: Vec<RecordEntry>,
    #[serde(rename = "firstNameGroup")]
    pub first_names: Vec<DictEntry>,
    #[serde(rename = "secondNameGroup")]
    pub second_names: Vec<DictEntry>,
    #[serde(rename = "birthDateGroup")]
    pub birth_dates: Vec<DictEntry>,
    #[serde(rename = "MGID")]
    pub main_ids: IdPool,
    #[serde(rename = "FNID")]
    pub first_name_ids: IdPool,
    #[serde(rename = "SNID")]
    pub second_name_ids: IdPool,
    #[serde(rename = "BDID")]
    pub birth_date_ids: IdPool,
}

impl StoreDocument {
    /// Empty document: no users, all counters seeded at 1
    pub fn bootstrap() -> Self {
        Self {
            main: Vec::new(),
            first_names: Vec::new(),
            second_names: Vec::new(),
            birth_dates: Vec::new(),
            main_ids: IdPool::seed(),
            first_name_ids: IdPool::seed(),
            second_name_ids: IdPool::seed(),
            birth_date_ids: IdPool::seed(),
        }
    }

    /// Parse the document from an existing storage file
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| AppError::init(format!("cannot read {}: {}", path.display(), e)))?;
        let doc: StoreDocument = serde_json::from_str(&raw)
            .map_err(|e| AppError::init(format!("cannot parse {}: {}", path.display(), e)))?;
        doc.validate()?;
        tracing::debug!(path = %path.display(), users = doc.main.len(), "storage file parsed");
        Ok(doc)
    }

    /// Rewrite the whole storage file from the in-memory document
    pub fn persist(&self, path: &Path) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::persistence(format!("cannot serialize document: {}", e)))?;
        fs::write(path, raw)
            .map_err(|e| AppError::persistence(format!("cannot write {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "storage file rewritten");
        Ok(())
    }

    /// Structural check: every pool must carry its counter slot
    pub fn validate(&self) -> AppResult<()> {
        let pools = [
            ("MGID", &self.main_ids),
            ("FNID", &self.first_name_ids),
            ("SNID", &self.second_name_ids),
            ("BDID", &self.birth_date_ids),
        ];
        for (name, pool) in pools {
            if !pool.has_counter() {
                return Err(AppError::format(format!(
                    "id pool {} is missing its counter slot",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Entries of one attribute dictionary
    pub fn dictionary(&self, attr: Attribute) -> &Vec<DictEntry> {
        match attr {
            Attribute::FirstName => &self.first_names,
            Attribute::SecondName => &self.second_names,
            Attribute::BirthDate => &self.birth_dates,
        }
    }

    pub fn dictionary_mut(&mut self, attr: Attribute) -> &mut Vec<DictEntry> {
        match attr {
            Attribute::FirstName => &mut self.first_names,
            Attribute::SecondName => &mut self.second_names,
            Attribute::BirthDate => &mut self.birth_dates,
        }
    }

    /// Id-pool sidecar of one attribute dictionary
    pub fn pool_mut(&mut self, attr: Attribute) -> &mut IdPool {
        match attr {
            Attribute::FirstName => &mut self.first_name_ids,
            Attribute::SecondName => &mut self.second_name_ids,
            Attribute::BirthDate => &mut self.birth_date_ids,
        }
    }
}
