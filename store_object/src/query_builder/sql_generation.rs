//! WHERE clause generation

use crate::errors::StoreError;
use crate::query_builder::filter::{QueryCondition, QueryFilter};
use crate::query_builder::params::Bindings;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build `" WHERE a = $1 AND b > $2"` from the filter, binding its values.
    ///
    /// Every operator is resolved before anything is bound, so an invalid
    /// operator leaves `bindings` untouched.
    pub fn build_where_clause(
        filter: &QueryFilter,
        bindings: &mut Bindings,
    ) -> Result<String, StoreError> {
        let conditions = filter.conditions()?;
        if conditions.is_empty() {
            return Ok(String::new());
        }

        let conditions_sql = conditions
            .iter()
            .map(|condition| Self::build_condition_sql(condition, bindings))
            .collect::<Vec<_>>()
            .join(" AND ");

        Ok(format!(" WHERE {}", conditions_sql))
    }

    fn build_condition_sql(condition: &QueryCondition, bindings: &mut Bindings) -> String {
        let param = bindings.push_for(&condition.field, condition.value.clone());
        format!(
            "{} {} {}",
            condition.field,
            condition.operator.to_sql(),
            param
        )
    }
}
