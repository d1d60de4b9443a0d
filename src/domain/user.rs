//! User domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::ValidationError;

use crate::config::BIRTH_DATE_FORMAT;

/// User domain entity.
///
/// All three attributes are plain strings in storage; the birth date is
/// validated at the API boundary but compared byte-for-byte inside the
/// store, so two spellings of the same date are two distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Given name
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name
    #[schema(example = "Doe")]
    pub second_name: String,
    /// Birth date, `YYYY-MM-DD`
    #[schema(example = "1990-05-17")]
    pub birth_date: String,
}

impl User {
    pub fn new(
        first_name: impl Into<String>,
        second_name: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            second_name: second_name.into(),
            birth_date: birth_date.into(),
        }
    }
}

/// Partial user update: attributes left as `None` are not touched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub birth_date: Option<String>,
}

impl UserPatch {
    /// True when no attribute is being changed
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.second_name.is_none() && self.birth_date.is_none()
    }
}

/// Attribute filter for listing users. An empty filter matches everyone.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct UserFilter {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub birth_date: Option<String>,
}

impl UserFilter {
    /// True when no filter attribute is supplied
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.second_name.is_none() && self.birth_date.is_none()
    }
}

/// Reference to a stored user (returned by create and list endpoints)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRef {
    /// Record id
    #[schema(example = 1)]
    pub id: u32,
    /// Resource location
    #[schema(example = "/users/1")]
    pub href: String,
}

impl UserRef {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            href: format!("/users/{}", id),
        }
    }
}

/// Validator rule for birth-date request fields
pub fn validate_birth_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("birth_date_format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_birth_date_passes() {
        assert!(validate_birth_date("1990-05-17").is_ok());
    }

    #[test]
    fn malformed_birth_date_fails() {
        assert!(validate_birth_date("17.05.1990").is_err());
        assert!(validate_birth_date("1990-13-40").is_err());
        assert!(validate_birth_date("").is_err());
    }

    #[test]
    fn empty_filter_detection() {
        assert!(UserFilter::default().is_empty());
        let filter = UserFilter {
            first_name: Some("John".to_string()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
