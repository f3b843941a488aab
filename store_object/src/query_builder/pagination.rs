//! LIMIT / OFFSET handling

/// Pagination configuration.
///
/// A zero limit or offset is treated exactly like an absent one: the clause
/// is left out. `LIMIT 0` therefore cannot be requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            limit: None,
            offset: None,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// `" LIMIT l OFFSET o"` with each half present only when non-zero
    pub fn to_sql(&self) -> String {
        let mut clause = String::new();

        if let Some(limit) = self.limit.filter(|limit| *limit != 0) {
            clause.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset.filter(|offset| *offset != 0) {
            clause.push_str(&format!(" OFFSET {}", offset));
        }

        clause
    }
}
