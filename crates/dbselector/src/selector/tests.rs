use super::*;
use crate::Row;
use crate::config::Dialect;
use std::collections::HashMap;

fn binds<const N: usize>(pairs: [(&str, Value); N]) -> NamedBinds {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect::<HashMap<_, _>>()
}

#[derive(Clone, Row)]
struct Post {
    id: i64,
    title: String,
    #[db(column = "author_id")]
    author: i32,
    #[db(skip)]
    draft: Vec<String>,
}

fn post(title: &str, author: i32) -> Post {
    Post {
        id: 0,
        title: title.to_string(),
        author,
        draft: Vec::new(),
    }
}

#[test]
fn select_without_where() {
    let mut sel = Selector::new();
    sel.select_from("user");
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "SELECT * FROM \"user\"");
    assert!(b.is_empty());
}

#[test]
fn select_with_where() {
    let mut sel = Selector::new();
    sel.select_from("user").where_("name", "=", "Vova");
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "SELECT * FROM \"user\" WHERE name = :name1");
    assert_eq!(b, binds([("name1", Value::from("Vova"))]));
}

#[test]
fn empty_where_in_renders_where_true() {
    let mut sel = Selector::new();
    sel.select_from("user").where_in("id", Vec::<i64>::new());
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "SELECT * FROM \"user\" WHERE true");
    assert!(b.is_empty());
}

#[test]
fn empty_and_in_or_in_are_no_ops() {
    let mut with = Selector::new();
    with.select_from("user")
        .where_("age", ">", 18)
        .and_in("id", Vec::<i64>::new())
        .or_in("id", Vec::<i64>::new());

    let mut without = Selector::new();
    without.select_from("user").where_("age", ">", 18);

    assert_eq!(with.render().unwrap(), without.render().unwrap());
}

#[test]
fn complex_clause_with_nested_brackets() {
    let mut sel = Selector::new();
    sel.select_from("user")
        .open_bracket()
        .where_("name", "=", "Vova")
        .open_bracket()
        .and("age", ">", 36)
        .or("age", "<", 18)
        .close_bracket()
        .close_bracket()
        .and_in("height", [170, 171, 172])
        .or("active", "=", false)
        .order_by_raw("name")
        .limit(5)
        .offset(10);
    let (sql, b) = sel.render().unwrap();

    assert_eq!(
        sql,
        "SELECT * FROM \"user\" WHERE ( name = :name1 \
         AND ( age > :age2 OR age < :age3) )  AND height IN (:height4,:height5,:height6) \
         OR active = :active7 ORDER BY name LIMIT 5 OFFSET 10"
    );
    assert_eq!(
        b,
        binds([
            ("name1", Value::from("Vova")),
            ("age2", Value::Int(36)),
            ("age3", Value::Int(18)),
            ("height4", Value::Int(170)),
            ("height5", Value::Int(171)),
            ("height6", Value::Int(172)),
            ("active7", Value::Bool(false)),
        ])
    );
}

#[test]
fn count_projection() {
    let mut sel = Selector::new();
    sel.select_from("user").where_("name", "=", "Vova").count();
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "SELECT count(*) FROM \"user\" WHERE name = :name1");
    assert_eq!(b, binds([("name1", Value::from("Vova"))]));
}

#[test]
fn bound_ordering_binds_field_names() {
    let mut sel = Selector::new();
    sel.select_from("user")
        .order_by_bound("email", "ASC")
        .order_by_bound("name", "DESC");
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "SELECT * FROM \"user\" ORDER BY :email1 asc, :name2 desc");
    assert_eq!(
        b,
        binds([
            ("email1", Value::from("email")),
            ("name2", Value::from("name")),
        ])
    );
}

#[test]
fn unknown_direction_defaults_to_asc() {
    let mut sel = Selector::new();
    sel.select_from("user").order_by_bound("email", "upwards");
    assert_eq!(sel.to_sql(), "SELECT * FROM \"user\" ORDER BY :email1 asc");
}

#[test]
fn delete_with_where() {
    let mut sel = Selector::new();
    sel.delete_from("user").where_("id", ">", "7");
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "DELETE FROM \"user\" WHERE id > :id1");
    assert_eq!(b, binds([("id1", Value::from("7"))]));
}

#[test]
fn delete_returning() {
    let mut sel = Selector::new();
    sel.delete_from("user")
        .where_("id", "=", 3)
        .returning(["id", "name"]);
    assert_eq!(
        sel.to_sql(),
        "DELETE FROM \"user\" WHERE id = :id1 RETURNING id,name"
    );
}

#[test]
fn update_set_then_where() {
    let mut sel = Selector::new();
    sel.update_table("post")
        .set("title", "Test")
        .set("author_id", 4);
    sel.where_("active", "=", true).or("id", "=", 77);
    let (sql, b) = sel.render().unwrap();
    assert_eq!(
        sql,
        "UPDATE \"post\" SET title = :title1, author_id = :author_id2 \
         WHERE active = :active3 OR id = :id4"
    );
    assert_eq!(
        b,
        binds([
            ("title1", Value::from("Test")),
            ("author_id2", Value::Int(4)),
            ("active3", Value::Bool(true)),
            ("id4", Value::Int(77)),
        ])
    );
}

#[test]
fn update_keeps_duplicate_set_fields() {
    let mut sel = Selector::new();
    sel.update_table("post").set("title", "a").set("title", "b");
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "UPDATE \"post\" SET title = :title1, title = :title2");
    assert_eq!(b.len(), 2);
}

#[test]
fn insert_without_rows_has_no_values_clause() {
    let mut sel = Selector::new();
    sel.insert_into("table").values(Vec::<Post>::new());
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "INSERT INTO \"table\"");
    assert!(b.is_empty());
}

#[test]
fn insert_rows_skip_id_and_skipped_fields() {
    let first = post("Hello", 1);
    let second = post("World", 2);
    assert!(first.draft.is_empty());

    let mut sel = Selector::new();
    sel.insert_into("post")
        .values([first, second])
        .returning(["id"]);
    let (sql, b) = sel.render().unwrap();
    assert_eq!(
        sql,
        "INSERT INTO \"post\" (title, author_id) VALUES \
         (:title1, :author_id2), (:title3, :author_id4) RETURNING id"
    );
    assert_eq!(
        b,
        binds([
            ("title1", Value::from("Hello")),
            ("author_id2", Value::Int(1)),
            ("title3", Value::from("World")),
            ("author_id4", Value::Int(2)),
        ])
    );
}

#[test]
fn repeated_field_gets_distinct_binds() {
    let mut sel = Selector::new();
    sel.select_from("user").where_("id", ">", 10).and("id", "<", 55);
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql, "SELECT * FROM \"user\" WHERE id > :id1 AND id < :id2");
    assert_eq!(b, binds([("id1", Value::Int(10)), ("id2", Value::Int(55))]));
}

#[test]
fn digit_suffixed_field_never_shares_a_bind() {
    let mut sel = Selector::new();
    sel.select_from("t").where_("a1", "=", 100);
    for i in 2..=10 {
        sel.and(format!("f{i}"), "=", i);
    }
    sel.and("a", "=", 200);

    let (sql, b) = sel.render().unwrap();
    assert!(sql.starts_with("SELECT * FROM \"t\" WHERE a1 = :a11 AND f2 = :f22"));
    assert!(sql.ends_with("AND f10 = :f1010 AND a = :a_11"));
    assert_eq!(sql.matches(':').count(), 11);
    assert_eq!(b.len(), 11);
    assert_eq!(b.get("a11"), Some(&Value::Int(100)));
    assert_eq!(b.get("a_11"), Some(&Value::Int(200)));
}

#[test]
fn parameter_prefix_applies_to_every_bind() {
    let mut sel = Selector::new();
    sel.set_parameter_prefix("q1_");
    sel.select_from("table")
        .where_("name", "=", "Vova")
        .order_by_bound("id", "DESC");
    let (sql, b) = sel.render().unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM \"table\" WHERE name = :q1_name1 ORDER BY :q1_id2 desc"
    );
    assert_eq!(
        b,
        binds([("q1_name1", Value::from("Vova")), ("q1_id2", Value::from("id"))])
    );
}

#[test]
fn positional_postgres_orders_values() {
    let mut sel = Selector::new();
    sel.delete_from("user")
        .where_("id", ">", 137)
        .or("name", "LIKE", "%Vov%");
    let (sql, params) = sel.render_positional().unwrap();
    assert_eq!(sql, "DELETE FROM \"user\" WHERE id > $1 OR name LIKE $2");
    assert_eq!(params, vec![Value::Int(137), Value::from("%Vov%")]);
}

#[test]
fn positional_mysql_uses_question_marks() {
    let mut sel = Selector::with_config(SelectorConfig::new().dialect(Dialect::MySql));
    sel.select_from("user")
        .where_("a", "=", 1)
        .and_in("b", [2, 3])
        .order_by_bound("c", "desc");
    let (sql, params) = sel.render_positional().unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM \"user\" WHERE a = ? AND b IN (?,?) ORDER BY ? desc"
    );
    assert_eq!(
        params,
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::from("c")]
    );
}

#[test]
fn positional_prefix_is_ignored() {
    let mut sel = Selector::new();
    sel.set_parameter_prefix("q1_")
        .select_from("user")
        .where_("a", "=", 1);
    let (sql, _) = sel.render_positional().unwrap();
    assert_eq!(sql, "SELECT * FROM \"user\" WHERE a = $1");
}

#[test]
fn positional_query_exposes_param_refs() {
    let mut sel = Selector::new();
    sel.update_table("t").set("a", 1).where_("b", "=", "x");
    let q = sel.positional_query().unwrap();
    assert_eq!(q.sql, "UPDATE \"t\" SET a = $1 WHERE b = $2");
    assert_eq!(q.params_ref().len(), 2);
}

#[test]
fn render_is_repeatable() {
    let mut sel = Selector::new();
    sel.select_from("user")
        .where_("a", "=", 1)
        .or_in("b", ["x", "y"])
        .order_by_bound("a", "asc");
    let first = sel.render().unwrap();
    let second = sel.render().unwrap();
    assert_eq!(first, second);

    let (sql, _) = sel.render_positional().unwrap();
    let (again, _) = sel.render_positional().unwrap();
    assert_eq!(sql, again);
}

#[test]
fn placeholder_count_matches_bind_count() {
    let mut sel = Selector::new();
    sel.select_from("user")
        .open_bracket()
        .where_("a", "=", 1)
        .or("a", "=", 2)
        .close_bracket()
        .and_in("b", [1, 2, 3, 4])
        .or("c", "LIKE", "%z%")
        .order_by_bound("a", "desc");
    let (sql, b) = sel.render().unwrap();
    assert_eq!(sql.matches(':').count(), b.len());
    for key in b.keys() {
        assert!(sql.contains(&format!(":{key}")));
    }
}

#[test]
fn last_statement_selector_wins() {
    let mut sel = Selector::new();
    sel.select_from("a").delete_from("b");
    assert_eq!(sel.kind(), StatementKind::Delete);
    assert_eq!(sel.to_sql(), "DELETE FROM \"b\"");
}

#[test]
fn leading_and_renders_but_fails_validation() {
    let mut sel = Selector::new();
    sel.select_from("user").and("a", "=", 1);
    assert_eq!(sel.to_sql(), "SELECT * FROM \"user\" AND a = :a1");
    assert!(sel.validate().unwrap_err().is_grammar());
    assert!(sel.render_checked().is_err());
}

#[test]
fn render_checked_accepts_balanced_chain() {
    let mut sel = Selector::new();
    sel.select_from("user")
        .open_bracket()
        .where_("a", "=", 1)
        .or("b", "=", 2)
        .close_bracket();
    let (sql, _) = sel.render_checked().unwrap();
    assert_eq!(sql, "SELECT * FROM \"user\" WHERE ( a = :a1 OR b = :b2) ");
}

#[test]
fn fragment_helpers() {
    let mut sel = Selector::new();
    sel.select_from("user")
        .where_("name", "=", "Vova")
        .and("age", ">", 18)
        .order_by_raw("name DESC")
        .limit(20)
        .offset(40);

    let (conditions, b) = sel.where_sql();
    assert_eq!(conditions, "name = :name1 AND age > :age2");
    assert_eq!(b.len(), 2);
    assert_eq!(sel.limit_sql(), " LIMIT 20");
    assert_eq!(sel.offset_sql(), " OFFSET 40");
    assert_eq!(sel.order_by_sql(), " ORDER BY name DESC");
}

#[test]
fn where_sql_is_empty_without_conditions() {
    let sel = Selector::new();
    let (conditions, b) = sel.where_sql();
    assert_eq!(conditions, "");
    assert!(b.is_empty());
}

#[test]
fn option_values_bind_null() {
    let mut sel = Selector::new();
    sel.update_table("user").set("deleted_at", Option::<String>::None);
    let (_, b) = sel.render().unwrap();
    assert_eq!(b.get("deleted_at1"), Some(&Value::Null));
}
