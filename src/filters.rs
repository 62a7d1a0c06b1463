use log::warn;
use serde::Deserialize;

use crate::models::property::PropertyRecord;
use crate::store::query::QueryBuilder;

/// Columns probed by the free-text search, in the order they appear in the
/// composed constraint.
pub const SEARCH_COLUMNS: &[&str] = &["title", "locality", "city"];

/// Bedrooms selection meaning "five or more".
pub const BEDROOMS_OPEN_BUCKET: &str = "5+";

/// One snapshot of the user's search selection.
///
/// Every field is independently optional; the empty string places no
/// constraint on the result, so the default snapshot matches the whole
/// collection. Snapshots are replaced wholesale on every edit, never merged
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search: String,
    pub city: String,
    pub property_type: String,
    pub min_price: String,
    pub max_price: String,
    pub bedrooms: String,
    pub status: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.city.is_empty()
            && self.property_type.is_empty()
            && self.min_price.is_empty()
            && self.max_price.is_empty()
            && self.bedrooms.is_empty()
            && self.status.is_empty()
    }
}

/// A single predicate of a composed query. Constraints combine
/// conjunctively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Case-insensitive unanchored substring match against any listed
    /// column.
    AnyContains {
        columns: &'static [&'static str],
        needle: String,
    },
    Equals {
        column: &'static str,
        value: String,
    },
    AtLeast {
        column: &'static str,
        value: i64,
    },
    AtMost {
        column: &'static str,
        value: i64,
    },
}

/// Translates a criteria snapshot into its constraint list.
///
/// Pure and deterministic: the same snapshot always yields the same list in
/// the same order. Conflicting price bounds pass through verbatim; the
/// store answers them with an empty result set. The fixed newest-first
/// ordering of results is applied by the store client, not composed here.
pub fn compose(criteria: &FilterCriteria) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    if !criteria.search.is_empty() {
        constraints.push(Constraint::AnyContains {
            columns: SEARCH_COLUMNS,
            needle: criteria.search.clone(),
        });
    }
    if !criteria.city.is_empty() {
        constraints.push(Constraint::Equals {
            column: "city",
            value: criteria.city.clone(),
        });
    }
    if !criteria.property_type.is_empty() {
        constraints.push(Constraint::Equals {
            column: "property_type",
            value: criteria.property_type.clone(),
        });
    }
    if let Some(min_price) = parse_bound("min_price", &criteria.min_price) {
        constraints.push(Constraint::AtLeast {
            column: "price",
            value: min_price,
        });
    }
    if let Some(max_price) = parse_bound("max_price", &criteria.max_price) {
        constraints.push(Constraint::AtMost {
            column: "price",
            value: max_price,
        });
    }
    if !criteria.bedrooms.is_empty() {
        if criteria.bedrooms == BEDROOMS_OPEN_BUCKET {
            constraints.push(Constraint::AtLeast {
                column: "bedrooms",
                value: 5,
            });
        } else if let Some(bedrooms) = parse_bound("bedrooms", &criteria.bedrooms) {
            constraints.push(Constraint::Equals {
                column: "bedrooms",
                value: bedrooms.to_string(),
            });
        }
    }
    if !criteria.status.is_empty() {
        constraints.push(Constraint::Equals {
            column: "status",
            value: criteria.status.clone(),
        });
    }

    constraints
}

// Filter values arrive as free text. A bound that does not parse is dropped
// from the query rather than failing it.
fn parse_bound(field: &str, raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return None;
    }
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring non-numeric {} filter: {:?}", field, raw);
            None
        }
    }
}

impl Constraint {
    /// Adds this predicate to a store query.
    pub fn apply(&self, builder: QueryBuilder) -> QueryBuilder {
        match self {
            Constraint::AnyContains { columns, needle } => builder.or_ilike_any(columns, needle),
            Constraint::Equals { column, value } => builder.eq(column, value),
            Constraint::AtLeast { column, value } => builder.gte(column, *value),
            Constraint::AtMost { column, value } => builder.lte(column, *value),
        }
    }

    /// Evaluates this predicate against a record, mirroring the store-side
    /// semantics. Backs the in-memory store used in tests.
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        match self {
            Constraint::AnyContains { columns, needle } => {
                let needle = needle.to_lowercase();
                columns.iter().any(|column| {
                    text_column(record, column)
                        .map(|text| text.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
            }
            Constraint::Equals { column, value } => match *column {
                "city" => record.city == *value,
                "property_type" => record.property_type.to_string() == *value,
                "status" => record.status.to_string() == *value,
                "bedrooms" => value
                    .parse::<i64>()
                    .map(|bedrooms| record.bedrooms == bedrooms)
                    .unwrap_or(false),
                "slug" => record.slug == *value,
                _ => false,
            },
            Constraint::AtLeast { column, value } => numeric_column(record, column)
                .map(|actual| actual >= *value)
                .unwrap_or(false),
            Constraint::AtMost { column, value } => numeric_column(record, column)
                .map(|actual| actual <= *value)
                .unwrap_or(false),
        }
    }
}

/// True when `record` satisfies every constraint in the list.
pub fn matches_all(constraints: &[Constraint], record: &PropertyRecord) -> bool {
    constraints.iter().all(|constraint| constraint.matches(record))
}

fn text_column<'a>(record: &'a PropertyRecord, column: &str) -> Option<&'a str> {
    match column {
        "title" => Some(&record.title),
        "locality" => Some(&record.locality),
        "city" => Some(&record.city),
        _ => None,
    }
}

fn numeric_column(record: &PropertyRecord, column: &str) -> Option<i64> {
    match column {
        "price" => Some(record.price),
        "bedrooms" => Some(record.bedrooms),
        "bathrooms" => Some(record.bathrooms),
        _ => None,
    }
}
