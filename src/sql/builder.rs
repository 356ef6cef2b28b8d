//! Builds parameterized partial UPDATE statements from the fields a request actually supplied.

use super::params::PgBindValue;

/// Quote identifier for PostgreSQL (safe: callers pass static column names).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// `UPDATE table SET a = $1, b = $2 WHERE key = $3 RETURNING cols`, skipping fields left as `None`.
pub struct UpdateBuilder {
    table: &'static str,
    sets: Vec<(&'static str, PgBindValue)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        UpdateBuilder {
            table,
            sets: Vec::new(),
        }
    }

    pub fn set<V: Into<PgBindValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.sets.push((column, v.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn build(self, key_column: &str, key: i64, returning: &str) -> QueryBuf {
        let mut q = QueryBuf::new();
        let mut assignments = Vec::with_capacity(self.sets.len());
        for (col, value) in self.sets {
            let n = q.push_param(value);
            assignments.push(format!("{} = ${}", quoted(col), n));
        }
        let key_param = q.push_param(PgBindValue::I64(key));
        q.sql = format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            quoted(self.table),
            assignments.join(", "),
            quoted(key_column),
            key_param,
            returning
        );
        q
    }
}
