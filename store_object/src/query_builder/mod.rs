//! Query builder utilities
//!
//! Builds SQL fragments and their positional arguments from validated
//! request input, and assembles them into complete statements.

pub mod assembler;
pub mod builder;
pub mod fields;
pub mod filter;
pub mod insert;
pub mod ordering;
pub mod pagination;
pub mod params;
pub mod sql_generation;
pub mod statement;
pub mod update;



pub use assembler::{QueryAssembler, ReplacePlan};
pub use builder::QueryBuilder;
pub use fields::FieldSelection;
pub use filter::{FilterValue, QueryCondition, QueryFilter, QueryOperator};
pub use insert::InsertParts;
pub use ordering::{OrderBy, OrderTerm, SortOrder};
pub use pagination::Pagination;
pub use params::{Bindings, OneOrMany};
pub use statement::{ParamType, Statement};
pub use update::UpdateSet;
