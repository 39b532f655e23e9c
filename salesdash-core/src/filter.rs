//! Region/category filters and selector options.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{CleanedTable, OrderRecord};

/// Label of the "no filter" selector entry.
pub const ALL: &str = "All";

/// A selector value: the "All" sentinel or one specific label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub fn only(value: impl Into<String>) -> Self {
        Selector::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    /// Whether a record value passes this selector.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selector::All => ALL,
            Selector::Only(value) => value,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        if value == ALL {
            Selector::All
        } else {
            Selector::Only(value)
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Selector::from(value.to_string())
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.label().to_string()
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Selector::from(s))
    }
}

/// The two active selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub region: Selector,
    pub category: Selector,
}

impl FilterSelection {
    pub fn new(region: impl Into<Selector>, category: impl Into<Selector>) -> Self {
        Self {
            region: region.into(),
            category: category.into(),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, record: &OrderRecord) -> bool {
        self.region.matches(&record.region) && self.category.matches(&record.category)
    }
}

/// Which categorical column a selector applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Region,
    Category,
}

impl FilterField {
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Region => "Region",
            FilterField::Category => "Category",
        }
    }

    fn value(self, record: &OrderRecord) -> &str {
        match self {
            FilterField::Region => &record.region,
            FilterField::Category => &record.category,
        }
    }
}

/// Restrict `records` to the rows passing both selectors.
///
/// Always returns a fresh copy in source order; the input is never touched.
/// An empty result is a normal outcome.
pub fn apply_filters(records: &[OrderRecord], selection: &FilterSelection) -> Vec<OrderRecord> {
    records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect()
}

/// Selector entries for a column: "All" followed by the sorted distinct values.
pub fn selector_options(table: &CleanedTable, field: FilterField) -> Vec<String> {
    let distinct: BTreeSet<&str> = table.records().iter().map(|r| field.value(r)).collect();
    std::iter::once(ALL.to_string())
        .chain(distinct.into_iter().map(String::from))
        .collect()
}
