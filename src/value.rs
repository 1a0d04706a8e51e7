use std::{cmp::Ordering, sync::Arc};

use crate::{DateValue, prelude::*};

/// Tag naming the SQL type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ValueType {
    #[display(fmt = "NULL")]
    Null,
    #[display(fmt = "DATE")]
    Date,
}

/// A SQL value.
///
/// `Display` gives the plain string form, [`Value::to_sql`] the literal
/// that would appear in generated SQL. `NULL` sorts before everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Value {
    #[display(fmt = "NULL")]
    Null,
    #[display(fmt = "{}", "_0")]
    Date(Arc<DateValue>),
}

impl Value {
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Date(_) => ValueType::Date,
        }
    }

    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => ValueType::Null.to_string(),
            Self::Date(date) => date.to_sql(),
        }
    }

    /// Precision in digits
    pub fn precision(&self) -> u32 {
        match self {
            Self::Null => 1,
            Self::Date(date) => date.precision(),
        }
    }

    /// Nominal width of the string form
    pub fn display_size(&self) -> usize {
        match self {
            Self::Null => 4,
            Self::Date(date) => date.display_size(),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the date if this is a `DATE`
    pub const fn as_date(&self) -> Option<&Arc<DateValue>> {
        match self {
            Self::Date(date) => Some(date),
            Self::Null => None,
        }
    }
}

impl From<Arc<DateValue>> for Value {
    fn from(date: Arc<DateValue>) -> Self {
        Self::Date(date)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
        }
    }
}
