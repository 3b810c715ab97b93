//! Shared response shapes and helpers

use serde::Serialize;

use crate::http::error::ApiError;

/// Body returned by successful deletes
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub ok: bool,
}

impl Deleted {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Apply the configured empty-collection rule to a listing.
pub fn non_empty<T>(
    items: Vec<T>,
    resource: &'static str,
    empty_is_not_found: bool,
) -> Result<Vec<T>, ApiError> {
    if items.is_empty() && empty_is_not_found {
        return Err(ApiError::Empty { resource });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_rules() {
        assert!(matches!(
            non_empty(Vec::<u8>::new(), "tables", true),
            Err(ApiError::Empty { resource: "tables" })
        ));
        assert!(non_empty(Vec::<u8>::new(), "tables", false).unwrap().is_empty());
        assert_eq!(non_empty(vec![1, 2], "tables", true).unwrap(), vec![1, 2]);
    }
}
