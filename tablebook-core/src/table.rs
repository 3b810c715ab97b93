//! Restaurant table records

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A stored table, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: i32,
    pub name: Option<String>,
    pub seats: i32,
    pub location: Option<String>,
}

/// Validated input for creating a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTable {
    name: Option<String>,
    seats: i32,
    location: Option<String>,
}

impl NewTable {
    /// Create a new table definition.
    ///
    /// # Rules
    /// - `seats` must be greater than zero
    /// - `name` and `location` are free-form labels
    ///
    /// # Example
    /// ```
    /// use tablebook_core::NewTable;
    ///
    /// assert!(NewTable::new(Some("Window".into()), 4, None).is_ok());
    /// assert!(NewTable::new(None, 0, None).is_err());
    /// ```
    pub fn new(
        name: Option<String>,
        seats: i32,
        location: Option<String>,
    ) -> Result<Self, ValidationError> {
        if seats <= 0 {
            return Err(ValidationError::NotPositive {
                field: "seats",
                value: seats.into(),
            });
        }

        Ok(Self {
            name,
            seats,
            location,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn seats(&self) -> i32 {
        self.seats
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Attach a system-assigned id, producing the stored record.
    pub fn into_table(self, id: i32) -> Table {
        Table {
            id,
            name: self.name,
            seats: self.seats,
            location: self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_seats() {
        let table = NewTable::new(Some("Patio 1".into()), 2, Some("patio".into())).unwrap();
        assert_eq!(table.seats(), 2);
        assert_eq!(table.name(), Some("Patio 1"));
        assert_eq!(table.location(), Some("patio"));
    }

    #[test]
    fn rejects_zero_seats() {
        let err = NewTable::new(None, 0, None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotPositive {
                field: "seats",
                value: 0
            }
        );
    }

    #[test]
    fn rejects_negative_seats() {
        let err = NewTable::new(None, -3, None).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { value: -3, .. }));
    }

    #[test]
    fn optional_labels() {
        let table = NewTable::new(None, 6, None).unwrap().into_table(7);
        assert_eq!(
            table,
            Table {
                id: 7,
                name: None,
                seats: 6,
                location: None
            }
        );
    }
}
