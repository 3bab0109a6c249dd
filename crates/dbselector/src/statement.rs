//! Statement assembly for SELECT / INSERT / UPDATE / DELETE.

use crate::clause::ClauseList;
use crate::error::{SelectorError, SelectorResult};
use crate::namer::ParamNamer;
use crate::row::{ColumnField, Row, map_columns, read_values};
use crate::value::Value;
use crate::where_clause::render_where;
use std::fmt;

/// Statement kind. The last selector call wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction for bound ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Normalize a direction string; anything other than `desc`
    /// (case-insensitive) is treated as ascending.
    pub fn parse(dir: &str) -> Self {
        if dir.eq_ignore_ascii_case("desc") {
            OrderDirection::Desc
        } else {
            OrderDirection::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SetItem {
    pub field: String,
    pub value: Value,
}

/// Everything accumulated by the builder, consumed by rendering.
#[derive(Default)]
pub(crate) struct Statement {
    pub kind: StatementKind,
    pub table: String,
    pub clauses: ClauseList,
    pub order_raw: Option<String>,
    pub orders: Vec<(String, OrderDirection)>,
    pub limit: i64,
    pub offset: i64,
    pub count: bool,
    pub returning: Vec<String>,
    pub sets: Vec<SetItem>,
    pub rows: Vec<Box<dyn Row>>,
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("kind", &self.kind)
            .field("table", &self.table)
            .field("clauses", &self.clauses)
            .field("order_raw", &self.order_raw)
            .field("orders", &self.orders)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("count", &self.count)
            .field("returning", &self.returning)
            .field("sets", &self.sets)
            .field("rows", &self.rows.len())
            .finish()
    }
}

impl Statement {
    /// Render the full statement. Only INSERT row mapping can fail.
    pub fn render(&self, namer: &mut ParamNamer<'_>) -> SelectorResult<String> {
        match self.kind {
            StatementKind::Select => Ok(self.render_select(namer)),
            StatementKind::Delete => Ok(self.render_delete(namer)),
            StatementKind::Update => Ok(self.render_update(namer)),
            StatementKind::Insert => self.render_insert(namer),
        }
    }

    fn render_select(&self, namer: &mut ParamNamer<'_>) -> String {
        let projection = if self.count { "count(*)" } else { "*" };
        let mut sql = format!("SELECT {} FROM \"{}\"", projection, self.table);
        sql.push_str(&render_where(&self.clauses, namer));

        let order_raw = self.order_by_sql();
        if !order_raw.is_empty() {
            sql.push_str(&order_raw);
        } else if !self.orders.is_empty() {
            let parts: Vec<String> = self
                .orders
                .iter()
                .map(|(field, dir)| {
                    // The field name itself is the bound value.
                    let ph = namer.bind(field, Value::Text(field.clone()));
                    format!("{} {}", ph, dir.as_str())
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&parts.join(", "));
        }

        sql.push_str(&self.limit_sql());
        sql.push_str(&self.offset_sql());
        sql
    }

    fn render_delete(&self, namer: &mut ParamNamer<'_>) -> String {
        let mut sql = format!("DELETE FROM \"{}\"", self.table);
        sql.push_str(&render_where(&self.clauses, namer));
        sql.push_str(&self.returning_sql());
        sql
    }

    fn render_update(&self, namer: &mut ParamNamer<'_>) -> String {
        let mut sql = format!("UPDATE \"{}\" SET", self.table);
        let assignments: Vec<String> = self
            .sets
            .iter()
            .map(|item| {
                let ph = namer.bind(&item.field, item.value.clone());
                format!(" {} = {}", item.field, ph)
            })
            .collect();
        sql.push_str(&assignments.join(","));
        sql.push_str(&render_where(&self.clauses, namer));
        sql.push_str(&self.returning_sql());
        sql
    }

    fn render_insert(&self, namer: &mut ParamNamer<'_>) -> SelectorResult<String> {
        let mut sql = format!("INSERT INTO \"{}\"", self.table);
        sql.push_str(&self.values_sql(namer)?);
        sql.push_str(&self.returning_sql());
        Ok(sql)
    }

    /// ` (cols) VALUES (...), (...)`; empty when there are no rows.
    ///
    /// The column layout comes from the first row and is reused for every
    /// row. Columns named `id` (any case) are left to the database.
    fn values_sql(&self, namer: &mut ParamNamer<'_>) -> SelectorResult<String> {
        let Some(first) = self.rows.first() else {
            return Ok(String::new());
        };

        let columns: Vec<ColumnField> = map_columns(&**first)?
            .into_iter()
            .filter(|col| col.column.to_lowercase() != "id")
            .collect();
        if columns.is_empty() {
            return Err(SelectorError::mapping(
                first.type_name(),
                "no insertable columns after skipped and id fields",
            ));
        }

        let mut groups = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let values = read_values(&**row, &columns)?;
            let placeholders: Vec<String> = columns
                .iter()
                .zip(values)
                .map(|(col, value)| namer.bind(col.column, value))
                .collect();
            groups.push(format!("({})", placeholders.join(", ")));
        }

        let names: Vec<&str> = columns.iter().map(|col| col.column).collect();
        Ok(format!(
            " ({}) VALUES {}",
            names.join(", "),
            groups.join(", ")
        ))
    }

    pub fn limit_sql(&self) -> String {
        if self.limit > 0 {
            format!(" LIMIT {}", self.limit)
        } else {
            String::new()
        }
    }

    pub fn offset_sql(&self) -> String {
        if self.offset > 0 {
            format!(" OFFSET {}", self.offset)
        } else {
            String::new()
        }
    }

    /// ORDER BY from the raw ordering string only.
    pub fn order_by_sql(&self) -> String {
        match self.order_raw.as_deref() {
            Some(order) if !order.is_empty() => format!(" ORDER BY {order}"),
            _ => String::new(),
        }
    }

    fn returning_sql(&self) -> String {
        if self.returning.is_empty() {
            String::new()
        } else {
            format!(" RETURNING {}", self.returning.join(","))
        }
    }
}
