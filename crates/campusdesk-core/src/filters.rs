//! Dynamic `WHERE` clauses for list endpoints.
//!
//! Every filter value is bound as text and cast in SQL, so one parameter
//! list serves both the `COUNT(*)` and the data query. Column names and
//! casts are always literals from the calling code, never request input.
//!
//! # Example
//!
//! ```ignore
//! let mut filter = FilterClause::new();
//! if let Some(id) = params.institution_id {
//!     filter.eq_cast("s.institution_id", id, "uuid");
//! }
//! let count_query = format!("SELECT COUNT(*) FROM students s WHERE 1=1{}", filter.sql());
//! let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
//! for param in filter.params() {
//!     count_sql = count_sql.bind(param);
//! }
//! ```

#[derive(Debug, Default, Clone)]
pub struct FilterClause {
    sql: String,
    params: Vec<String>,
}

impl FilterClause {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, column: &str, op: &str, value: String, cast: Option<&str>) -> &mut Self {
        self.params.push(value);
        let n = self.params.len();
        match cast {
            Some(cast) => self
                .sql
                .push_str(&format!(" AND {} {} ${}::{}", column, op, n, cast)),
            None => self.sql.push_str(&format!(" AND {} {} ${}", column, op, n)),
        }
        self
    }

    /// `column = $n` against a text column.
    pub fn eq(&mut self, column: &str, value: impl ToString) -> &mut Self {
        self.push(column, "=", value.to_string(), None)
    }

    /// `column = $n::cast` for uuid, integer, boolean or date columns.
    pub fn eq_cast(&mut self, column: &str, value: impl ToString, cast: &str) -> &mut Self {
        self.push(column, "=", value.to_string(), Some(cast))
    }

    pub fn gte_cast(&mut self, column: &str, value: impl ToString, cast: &str) -> &mut Self {
        self.push(column, ">=", value.to_string(), Some(cast))
    }

    pub fn lte_cast(&mut self, column: &str, value: impl ToString, cast: &str) -> &mut Self {
        self.push(column, "<=", value.to_string(), Some(cast))
    }

    /// Case-insensitive substring match.
    pub fn contains(&mut self, column: &str, value: &str) -> &mut Self {
        self.push(column, "ILIKE", format!("%{}%", escape_like(value)), None)
    }

    /// Case-sensitive prefix match.
    pub fn starts_with(&mut self, column: &str, value: &str) -> &mut Self {
        self.push(column, "LIKE", format!("{}%", escape_like(value)), None)
    }

    /// The accumulated clause, each condition prefixed with ` AND`.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clause() {
        let filter = FilterClause::new();
        assert_eq!(filter.sql(), "");
        assert!(filter.params().is_empty());
    }

    #[test]
    fn test_placeholders_are_numbered_in_order() {
        let mut filter = FilterClause::new();
        filter
            .eq_cast("institution_id", "12345678-1234-1234-1234-123456789abc", "uuid")
            .eq("status", "Active")
            .eq_cast("enrollment_year", 2023, "int");
        assert_eq!(
            filter.sql(),
            " AND institution_id = $1::uuid AND status = $2 AND enrollment_year = $3::int"
        );
        assert_eq!(filter.params(), &["12345678-1234-1234-1234-123456789abc", "Active", "2023"]);
    }

    #[test]
    fn test_pattern_matches_escape_wildcards() {
        let mut filter = FilterClause::new();
        filter.contains("name", "50%_off").starts_with("student_id", "H23");
        assert_eq!(filter.sql(), " AND name ILIKE $1 AND student_id LIKE $2");
        assert_eq!(filter.params()[0], "%50\\%\\_off%");
        assert_eq!(filter.params()[1], "H23%");
    }

    #[test]
    fn test_range_conditions() {
        let mut filter = FilterClause::new();
        filter
            .gte_cast("date_paid", "2024-01-01", "date")
            .lte_cast("date_paid", "2024-12-31", "date");
        assert_eq!(
            filter.sql(),
            " AND date_paid >= $1::date AND date_paid <= $2::date"
        );
    }
}
