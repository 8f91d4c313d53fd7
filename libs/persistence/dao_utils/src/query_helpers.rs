use tokio_postgres::types::ToSql;

// Type aliases for PostgreSQL parameter types
pub type PgParam = dyn ToSql + Sync;
pub type PgSendParam = dyn ToSql + Sync + Send;
pub type PgParamBox = Box<PgSendParam>;
pub type PgParamVec = Vec<PgParamBox>;

/// Accumulates `AND`-joined predicates together with their bound values.
///
/// Column names are trusted identifiers supplied by the DAO; values always
/// travel as `$n` parameters and never end up in the SQL text.
#[derive(Default)]
pub struct WhereClause {
    predicates: Vec<String>,
    params: PgParamVec,
}

impl WhereClause {
    pub fn new() -> Self { Self::default() }

    /// `column = $n`
    pub fn eq<T>(self, column: &str, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.push(|n| format!("{column} = ${n}"), value)
    }

    /// Literal substring match: `strpos(column, $n) > 0`.
    ///
    /// Unlike `LIKE`, `%` and `_` in the value carry no special meaning.
    pub fn contains<T>(self, column: &str, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.push(|n| format!("strpos({column}, ${n}) > 0"), value)
    }

    pub fn eq_opt<T>(self, column: &str, value: Option<T>) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        match value {
            Some(value) => self.eq(column, value),
            None => self,
        }
    }

    pub fn contains_opt<T>(self, column: &str, value: Option<T>) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        match value {
            Some(value) => self.contains(column, value),
            None => self,
        }
    }

    fn push<T, F>(mut self, predicate: F, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
        F: FnOnce(usize) -> String,
    {
        self.params.push(Box::new(value));
        self.predicates.push(predicate(self.params.len()));
        self
    }

    /// Binds a trailing value (e.g. a `LIMIT`) and returns its placeholder.
    pub fn bind<T>(&mut self, value: T) -> String
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.params.push(Box::new(value));
        format!("${}", self.params.len())
    }

    pub fn is_empty(&self) -> bool { self.predicates.is_empty() }

    /// Renders ` WHERE a AND b`, or an empty string when there are no
    /// predicates.
    pub fn sql(&self) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        format!(" WHERE {}", self.predicates.join(" AND "))
    }

    pub fn params(&self) -> Vec<&PgParam> {
        self.params
            .iter()
            .map(|p| p.as_ref() as &PgParam)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clause_renders_nothing() {
        let clause = WhereClause::new();
        assert!(clause.is_empty());
        assert_eq!(clause.sql(), "");
        assert!(clause.params().is_empty());
    }

    #[test]
    fn test_predicates_are_numbered_in_order() {
        let mut clause = WhereClause::new()
            .contains("metadata", "ABC".to_string())
            .eq("\"type\"", "page_view".to_string());
        let limit = clause.bind(50_i64);

        assert_eq!(
            clause.sql(),
            " WHERE strpos(metadata, $1) > 0 AND \"type\" = $2"
        );
        assert_eq!(limit, "$3");
        assert_eq!(clause.params().len(), 3);
    }

    #[test]
    fn test_optional_predicates_are_skipped() {
        let mut clause = WhereClause::new()
            .contains_opt("metadata", None::<String>)
            .eq_opt("\"type\"", Some("form_submit".to_string()));
        let limit = clause.bind(50_i64);

        assert_eq!(clause.sql(), " WHERE \"type\" = $1");
        assert_eq!(limit, "$2");
    }

    #[test]
    fn test_values_never_reach_sql_text() {
        let hostile = "x' OR '1'='1".to_string();
        let clause = WhereClause::new().contains("metadata", hostile);

        assert!(!clause.sql().contains("OR"));
        assert_eq!(clause.params().len(), 1);
    }
}
