//! Query-string parsing for list and single-record reads
//!
//! Accepts `key=value`, repeated keys or `key[]=v` / `key[0]=v` for
//! sequences and `field[op]=value` for operator filters. Every value stays a
//! string but must suit the field's rule; operator names are checked later by
//! the filter builder.

use indexmap::IndexMap;
use serde_json::Value;
use store_object::query_builder::{
    FieldSelection, FilterValue, OrderBy, OrderTerm, QueryBuilder, QueryFilter,
};
use store_object::schema::Schema;
use store_object::validation::{validate_column, validate_query_value, ValidationError};

const FIELDS: &str = "fields";
const SORT: &str = "sort";
const LIMIT: &str = "limit";
const OFFSET: &str = "offset";

#[derive(Debug, Clone, PartialEq)]
enum RawParam {
    Scalar(String),
    Sequence(Vec<String>),
    Operators(IndexMap<String, String>),
}

/// Split `name[sub]` into its name and bracket contents
fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.find('[') {
        Some(open) if open > 0 && key.ends_with(']') => {
            (&key[..open], Some(&key[open + 1..key.len() - 1]))
        }
        _ => (key, None),
    }
}

fn is_sequence_index(sub: &str) -> bool {
    sub.chars().all(|c| c.is_ascii_digit())
}

fn merge(
    existing: &mut RawParam,
    name: &str,
    operator: Option<&str>,
    value: String,
) -> Result<(), ValidationError> {
    match operator {
        None => match existing {
            RawParam::Scalar(first) => {
                let first = std::mem::take(first);
                *existing = RawParam::Sequence(vec![first, value]);
            }
            RawParam::Sequence(values) => values.push(value),
            RawParam::Operators(_) => {
                return Err(ValidationError::ExpectedSingle(name.to_string()))
            }
        },
        Some(op) => match existing {
            RawParam::Operators(operators) => {
                operators.insert(op.to_string(), value);
            }
            _ => return Err(ValidationError::ExpectedSingle(name.to_string())),
        },
    }
    Ok(())
}

fn collect(raw: &str) -> Result<IndexMap<String, RawParam>, ValidationError> {
    let mut params: IndexMap<String, RawParam> = IndexMap::new();

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        let (name, sub) = split_key(&key);
        let value = value.into_owned();
        // `key[]` and `key[0]` append to a sequence; anything else names an operator
        let operator = sub.filter(|sub| !is_sequence_index(sub));

        match params.get_mut(name) {
            Some(existing) => merge(existing, name, operator, value)?,
            None => {
                let fresh = match (sub, operator) {
                    (None, _) => RawParam::Scalar(value),
                    (Some(_), None) => RawParam::Sequence(vec![value]),
                    (Some(_), Some(op)) => {
                        let mut operators = IndexMap::new();
                        operators.insert(op.to_string(), value);
                        RawParam::Operators(operators)
                    }
                };
                params.insert(name.to_string(), fresh);
            }
        }
    }

    Ok(params)
}

fn column_list(param: &str, raw: RawParam) -> Result<Vec<String>, ValidationError> {
    match raw {
        RawParam::Scalar(value) => Ok(vec![value]),
        RawParam::Sequence(values) => Ok(values),
        RawParam::Operators(_) => Err(ValidationError::InvalidShape(param.to_string())),
    }
}

// Counts must fit a PostgreSQL BIGINT
fn count(param: &str, raw: RawParam) -> Result<u64, ValidationError> {
    let RawParam::Scalar(value) = raw else {
        return Err(ValidationError::ExpectedCount(param.to_string()));
    };
    value
        .parse::<i64>()
        .ok()
        .and_then(|count| u64::try_from(count).ok())
        .ok_or_else(|| ValidationError::ExpectedCount(param.to_string()))
}

/// Turn a raw query string into a validated [`QueryBuilder`] for `schema`
pub fn parse_list_query(raw: Option<&str>, schema: &Schema) -> Result<QueryBuilder, ValidationError> {
    let params = match raw {
        Some(raw) => collect(raw)?,
        None => IndexMap::new(),
    };

    let mut query = QueryBuilder::new();
    let mut filter = QueryFilter::new();

    for (name, raw) in params {
        match name.as_str() {
            FIELDS => {
                let fields = column_list(FIELDS, raw)?;
                for field in &fields {
                    validate_column(FIELDS, field, schema)?;
                }
                query = query.fields(FieldSelection::new(fields));
            }
            SORT => {
                let mut order_by = OrderBy::new();
                for entry in column_list(SORT, raw)? {
                    let term = OrderTerm::parse(&entry);
                    validate_column(SORT, &term.field, schema)?;
                    order_by = order_by.push(&term.field, term.order);
                }
                query = query.order(order_by);
            }
            LIMIT => query = query.limit(count(LIMIT, raw)?),
            OFFSET => query = query.offset(count(OFFSET, raw)?),
            field => {
                let rule = schema
                    .get(field)
                    .ok_or_else(|| ValidationError::NotAllowed(field.to_string()))?
                    .rule;
                match raw {
                    RawParam::Scalar(value) => {
                        validate_query_value(field, &value, rule)?;
                        filter.insert(field, FilterValue::Scalar(Value::String(value)))
                    }
                    RawParam::Operators(operators) => {
                        for value in operators.values() {
                            validate_query_value(field, value, rule)?;
                        }
                        filter.insert(
                            field,
                            FilterValue::Operators(
                                operators
                                    .into_iter()
                                    .map(|(op, value)| (op, Value::String(value)))
                                    .collect(),
                            ),
                        )
                    }
                    RawParam::Sequence(_) => {
                        return Err(ValidationError::ExpectedSingle(field.to_string()))
                    }
                }
            }
        }
    }

    if !filter.is_empty() {
        query = query.filter(filter);
    }
    Ok(query)
}
