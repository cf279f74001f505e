//! Backend-neutral filter predicates.
//!
//! A `Predicate` is a tree of conjunctions and disjunctions over typed field
//! conditions. The PostgreSQL store renders it to a parameterised `WHERE`
//! clause with [`Predicate::to_sql`]; in-process stores evaluate it directly
//! with [`Predicate::matches`]. Empty `And`/`Or` groups impose no constraint.

use crate::database::values::DatabaseValue;
use crate::models::resource::Resource;

/// Text columns that support containment conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    TagsCsv,
}

impl TextField {
    pub fn column(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::TagsCsv => "tags_csv",
        }
    }

    fn read<'a>(&self, resource: &'a Resource) -> &'a str {
        match self {
            TextField::Name => &resource.name,
            TextField::TagsCsv => &resource.tags_csv,
        }
    }
}

/// Boolean columns that support equality conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolField {
    IsActive,
}

impl BoolField {
    pub fn column(&self) -> &'static str {
        match self {
            BoolField::IsActive => "is_active",
        }
    }

    fn read(&self, resource: &Resource) -> bool {
        match self {
            BoolField::IsActive => resource.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    MatchAll,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    /// Case-sensitive substring containment.
    Contains { field: TextField, needle: String },
    Equals { field: BoolField, value: bool },
}

impl Predicate {
    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Predicate::MatchAll => true,
            Predicate::And(predicates) => predicates.iter().all(|p| p.matches(resource)),
            Predicate::Or(predicates) => {
                predicates.is_empty() || predicates.iter().any(|p| p.matches(resource))
            }
            Predicate::Contains { field, needle } => {
                field.read(resource).contains(needle.as_str())
            }
            Predicate::Equals { field, value } => field.read(resource) == *value,
        }
    }

    /// Renders the predicate as a SQL boolean expression.
    ///
    /// Parameters are appended to `values` and referenced by position, so
    /// the caller binds `values` in order. Returns `None` when the predicate
    /// places no constraint on the rows.
    pub fn to_sql(&self, values: &mut Vec<DatabaseValue>) -> Option<String> {
        match self {
            Predicate::MatchAll => None,
            Predicate::And(predicates) => join_sql(predicates, " AND ", values),
            Predicate::Or(predicates) => join_sql(predicates, " OR ", values),
            Predicate::Contains { field, needle } => {
                let value = DatabaseValue::from(needle.as_str());
                let placeholder = value.placeholder(values.len() + 1);
                values.push(value);
                Some(format!("position({} IN {}) > 0", placeholder, field.column()))
            }
            Predicate::Equals { field, value } => {
                let value = DatabaseValue::from(*value);
                let placeholder = value.placeholder(values.len() + 1);
                values.push(value);
                Some(format!("{} = {}", field.column(), placeholder))
            }
        }
    }
}

fn join_sql(
    predicates: &[Predicate],
    separator: &str,
    values: &mut Vec<DatabaseValue>,
) -> Option<String> {
    let clauses = predicates
        .iter()
        .filter_map(|predicate| predicate.to_sql(values))
        .collect::<Vec<String>>();
    match clauses.len() {
        0 => None,
        1 => clauses.into_iter().next(),
        _ => Some(format!("({})", clauses.join(separator))),
    }
}
