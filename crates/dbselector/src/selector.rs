//! The fluent [`Selector`] builder.

use crate::clause::{BracketKind, Connector};
use crate::config::{Dialect, SelectorConfig};
use crate::error::SelectorResult;
use crate::namer::{ParamNamer, PlaceholderStyle};
use crate::row::Row;
use crate::statement::{OrderDirection, SetItem, Statement, StatementKind};
use crate::value::{NamedBinds, Value};
use tokio_postgres::types::ToSql;

/// Builds a parameterized SQL statement and its bind collection.
///
/// Builder methods only record state; nothing is validated until render.
/// Field names, operators and the raw ORDER BY string are written into the
/// SQL verbatim and must never come from untrusted input. Only values are
/// bound.
///
/// # Example
/// ```ignore
/// use dbselector::Selector;
///
/// let mut sel = Selector::new();
/// sel.select_from("user")
///     .where_("name", "=", "Vova")
///     .or("email", "LIKE", "%@example.com")
///     .order_by_raw("name DESC")
///     .limit(5);
/// let (sql, binds) = sel.render()?;
/// // SELECT * FROM "user" WHERE name = :name1 OR email LIKE :email2 ORDER BY name DESC LIMIT 5
/// ```
///
/// Conditions should start with [`Selector::where_`]; a chain that starts with
/// `and`/`or` renders that keyword in place of `WHERE`. Use
/// [`Selector::validate`] or [`Selector::render_checked`] to catch this and
/// unbalanced brackets.
#[derive(Debug, Default)]
pub struct Selector {
    config: SelectorConfig,
    statement: Statement,
}

/// A positional render ready to pass to a tokio-postgres client.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl PositionalQuery {
    /// Parameters as references compatible with tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

impl Selector {
    /// Create a selector with the default configuration (PostgreSQL, no prefix).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SelectorConfig) -> Self {
        Self {
            config,
            statement: Statement::default(),
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn kind(&self) -> StatementKind {
        self.statement.kind
    }

    /// Prefix applied to every generated named bind.
    pub fn set_parameter_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.config.parameter_prefix = prefix.into();
        self
    }

    /// Dialect used for positional placeholders.
    pub fn set_dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.config.dialect = dialect;
        self
    }

    // ── statement kind ──────────────────────────────────────────────────

    pub fn select_from(&mut self, table: impl Into<String>) -> &mut Self {
        self.statement_kind(StatementKind::Select, table)
    }

    pub fn delete_from(&mut self, table: impl Into<String>) -> &mut Self {
        self.statement_kind(StatementKind::Delete, table)
    }

    pub fn update_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.statement_kind(StatementKind::Update, table)
    }

    pub fn insert_into(&mut self, table: impl Into<String>) -> &mut Self {
        self.statement_kind(StatementKind::Insert, table)
    }

    fn statement_kind(&mut self, kind: StatementKind, table: impl Into<String>) -> &mut Self {
        self.statement.kind = kind;
        self.statement.table = table.into();
        self
    }

    // ── conditions ──────────────────────────────────────────────────────

    /// Append `WHERE field operator :bind`.
    pub fn where_(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.predicate(Connector::Where, field, operator, value)
    }

    /// Append `AND field operator :bind`.
    pub fn and(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.predicate(Connector::And, field, operator, value)
    }

    /// Append `OR field operator :bind`.
    pub fn or(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.predicate(Connector::Or, field, operator, value)
    }

    /// Append `WHERE field IN (...)`. An empty set renders `WHERE true`.
    pub fn where_in<V: Into<Value>>(
        &mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.membership(Connector::Where, field, values)
    }

    /// Append `AND field IN (...)`. An empty set appends nothing.
    pub fn and_in<V: Into<Value>>(
        &mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.membership(Connector::And, field, values)
    }

    /// Append `OR field IN (...)`. An empty set appends nothing.
    pub fn or_in<V: Into<Value>>(
        &mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.membership(Connector::Or, field, values)
    }

    /// Open a bracket in front of the next condition.
    pub fn open_bracket(&mut self) -> &mut Self {
        self.statement.clauses.push_bracket(BracketKind::Open);
        self
    }

    /// Close a bracket after the last condition.
    pub fn close_bracket(&mut self) -> &mut Self {
        self.statement.clauses.push_bracket(BracketKind::Close);
        self
    }

    fn predicate(
        &mut self,
        connector: Connector,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.statement
            .clauses
            .push_predicate(connector, field, operator, value.into());
        self
    }

    fn membership<V: Into<Value>>(
        &mut self,
        connector: Connector,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        let values = values.into_iter().map(Into::into).collect();
        self.statement.clauses.push_in(connector, field, values);
        self
    }

    // ── ordering, paging, shaping ───────────────────────────────────────

    /// Raw ORDER BY text, e.g. `"name ASC, regdate DESC"`. Written verbatim;
    /// takes precedence over [`Selector::order_by_bound`].
    pub fn order_by_raw(&mut self, order: impl Into<String>) -> &mut Self {
        self.statement.order_raw = Some(order.into());
        self
    }

    /// Order by a bound field. `dir` is `asc` or `desc` in any case; anything
    /// else means `asc`. Repeatable.
    pub fn order_by_bound(&mut self, field: impl Into<String>, dir: &str) -> &mut Self {
        self.statement
            .orders
            .push((field.into(), OrderDirection::parse(dir)));
        self
    }

    /// LIMIT; values ≤ 0 are omitted.
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.statement.limit = limit;
        self
    }

    /// OFFSET; values ≤ 0 are omitted.
    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.statement.offset = offset;
        self
    }

    /// Project `count(*)` instead of `*` (SELECT only).
    pub fn count(&mut self) -> &mut Self {
        self.statement.count = true;
        self
    }

    /// Add `field = :bind` to an UPDATE's SET section.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.statement.sets.push(SetItem {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add rows for an INSERT. The column layout is taken from the first row
    /// at render time and every row is read with it.
    pub fn values<R: Row + 'static>(&mut self, rows: impl IntoIterator<Item = R>) -> &mut Self {
        self.statement
            .rows
            .extend(rows.into_iter().map(|row| Box::new(row) as Box<dyn Row>));
        self
    }

    /// RETURNING columns, joined with `,` and written verbatim.
    pub fn returning<S: Into<String>>(&mut self, columns: impl IntoIterator<Item = S>) -> &mut Self {
        self.statement
            .returning
            .extend(columns.into_iter().map(Into::into));
        self
    }

    // ── rendering ───────────────────────────────────────────────────────

    /// Render with named placeholders (`:name1`).
    pub fn render(&self) -> SelectorResult<(String, NamedBinds)> {
        self.render_with(PlaceholderStyle::Named)
    }

    /// Render with positional placeholders (`$1` for PostgreSQL, `?`
    /// otherwise). Values are ordered by placeholder number.
    pub fn render_positional(&self) -> SelectorResult<(String, Vec<Value>)> {
        let (sql, mut binds) = self.render_with(PlaceholderStyle::Positional(self.config.dialect))?;
        let params = (1..=binds.len())
            .filter_map(|n| binds.remove(&format!("${n}")))
            .collect();
        Ok((sql, params))
    }

    /// [`Selector::render_positional`] packaged for a tokio-postgres client.
    pub fn positional_query(&self) -> SelectorResult<PositionalQuery> {
        let (sql, params) = self.render_positional()?;
        Ok(PositionalQuery { sql, params })
    }

    /// Check bracket balance and WHERE-first ordering of conditions.
    pub fn validate(&self) -> SelectorResult<()> {
        self.statement.clauses.validate()
    }

    /// [`Selector::validate`], then [`Selector::render`].
    pub fn render_checked(&self) -> SelectorResult<(String, NamedBinds)> {
        self.validate()?;
        self.render()
    }

    /// Debug helper: named-mode SQL, or an empty string if rendering fails.
    pub fn to_sql(&self) -> String {
        self.render().map(|(sql, _)| sql).unwrap_or_default()
    }

    /// The WHERE conditions in named mode, without the leading `WHERE`.
    pub fn where_sql(&self) -> (String, NamedBinds) {
        let mut namer = ParamNamer::new(&self.config.parameter_prefix, PlaceholderStyle::Named);
        let sql = crate::where_clause::render_where(&self.statement.clauses, &mut namer);
        let conditions = sql
            .strip_prefix(" WHERE")
            .map(str::trim_start)
            .unwrap_or_else(|| sql.trim_start())
            .to_string();
        (conditions, namer.into_binds())
    }

    /// ` LIMIT n`, or empty.
    pub fn limit_sql(&self) -> String {
        self.statement.limit_sql()
    }

    /// ` OFFSET n`, or empty.
    pub fn offset_sql(&self) -> String {
        self.statement.offset_sql()
    }

    /// ` ORDER BY <raw>` for raw ordering; bound ordering is not included.
    pub fn order_by_sql(&self) -> String {
        self.statement.order_by_sql()
    }

    fn render_with(&self, style: PlaceholderStyle) -> SelectorResult<(String, NamedBinds)> {
        let mut namer = ParamNamer::new(&self.config.parameter_prefix, style);
        let sql = match self.statement.render(&mut namer) {
            Ok(sql) => sql,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "dbselector.sql",
                    kind = %self.statement.kind,
                    table = %self.statement.table,
                    error = %err,
                    "statement render failed"
                );
                return Err(err);
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "dbselector.sql",
            kind = %self.statement.kind,
            style = ?style,
            param_count = namer.count(),
            sql = %sql,
            "statement rendered"
        );

        Ok((sql, namer.into_binds()))
    }
}

#[cfg(test)]
mod tests;
