//! Optional allowlist that only lets queries through.
//!
//! Generated SQL normally runs verbatim. With `guard.read_only` set, the
//! executor first parses it with the MySQL dialect and refuses anything that
//! is not a `SELECT` (including `WITH` and set operations).

use sqlparser::ast::{Query, SetExpr, Statement};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

/// Returns the reason a statement is refused, or `Ok(())` if every statement
/// in `sql` is a query.
pub fn validate_readonly(sql: &str) -> Result<(), String> {
    let statements = Parser::parse_sql(&MySqlDialect {}, sql)
        .map_err(|e| format!("Failed to parse SQL statement: {}", e))?;

    if statements.is_empty() {
        return Err("Empty SQL statement".to_string());
    }

    for statement in &statements {
        match statement {
            Statement::Query(query) => check_query(query)?,
            other => {
                return Err(format!(
                    "only SELECT queries are allowed, got: {}",
                    leading_keyword(other)
                ));
            }
        }
    }

    Ok(())
}

/// `WITH ... UPDATE` and `WITH ... INSERT` parse as queries, so the body and
/// every CTE have to be inspected as well.
fn check_query(query: &Query) -> Result<(), String> {
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            check_query(&cte.query)?;
        }
    }
    check_set_expr(&query.body)
}

fn check_set_expr(expr: &SetExpr) -> Result<(), String> {
    match expr {
        SetExpr::Select(_) | SetExpr::Values(_) | SetExpr::Table(_) => Ok(()),
        SetExpr::Query(query) => check_query(query),
        SetExpr::SetOperation { left, right, .. } => {
            check_set_expr(left)?;
            check_set_expr(right)
        }
        SetExpr::Insert(statement) | SetExpr::Update(statement) => Err(format!(
            "only SELECT queries are allowed, got: {}",
            leading_keyword(statement)
        )),
    }
}

fn leading_keyword(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_queries() {
        assert!(validate_readonly("SELECT SUM(Sales) FROM sales_data_db.sales_data WHERE City='NYC';").is_ok());
        assert!(
            validate_readonly("WITH c AS (SELECT City FROM sales_data) SELECT * FROM c").is_ok()
        );
        assert!(validate_readonly("SELECT 1 UNION SELECT 2").is_ok());
    }

    #[test]
    fn rejects_writes() {
        let err = validate_readonly("DELETE FROM sales_data WHERE City = 'NYC'").unwrap_err();
        assert!(err.contains("DELETE"), "{}", err);

        assert!(validate_readonly("DROP TABLE sales_data").is_err());
        assert!(validate_readonly("INSERT INTO sales_data (City) VALUES ('Paris')").is_err());
    }

    #[test]
    fn rejects_writes_behind_common_table_expressions() {
        let err = validate_readonly("WITH c AS (SELECT 1) UPDATE sales_data SET Sales = 0")
            .unwrap_err();
        assert!(err.contains("UPDATE"), "{}", err);

        let err = validate_readonly(
            "WITH c AS (SELECT City FROM sales_data) INSERT INTO sales_data (City) SELECT City FROM c",
        )
        .unwrap_err();
        assert!(err.contains("INSERT"), "{}", err);
    }

    #[test]
    fn allows_nested_and_combined_queries() {
        assert!(validate_readonly("(SELECT City FROM sales_data) UNION ALL (SELECT 'x')").is_ok());
        assert!(
            validate_readonly(
                "WITH a AS (WITH b AS (SELECT 1 AS n) SELECT n FROM b) SELECT n FROM a"
            )
            .is_ok()
        );
    }

    #[test]
    fn rejects_write_hidden_after_query() {
        assert!(validate_readonly("SELECT 1; UPDATE sales_data SET Sales = 0").is_err());
    }

    #[test]
    fn rejects_unparseable_text() {
        let err = validate_readonly("I'm sorry, I can't help with that.").unwrap_err();
        assert!(err.starts_with("Failed to parse"));
    }
}
