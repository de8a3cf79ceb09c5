use serde::Serialize;
use sqlparser::ast::Statement;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

use crate::error::InterpreterError;
use crate::interpreter::QueryResult;

/// Transcript label for a submission, taken from what the game did with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Read,
    Write,
    Rejected,
}

impl StatementKind {
    pub fn of(outcome: Result<&QueryResult, &InterpreterError>) -> Self {
        match outcome {
            Ok(QueryResult::Insert { .. }) => StatementKind::Write,
            Ok(QueryResult::Select { .. } | QueryResult::Aggregate { .. }) => StatementKind::Read,
            Err(_) => StatementKind::Rejected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Read => "read",
            StatementKind::Write => "write",
            StatementKind::Rejected => "rejected",
        }
    }
}

/// Names the statement when it is valid SQL the game has no rule for,
/// e.g. `UPDATE` or `DROP`. Reads and inserts return `None`, as does
/// anything sqlparser cannot parse.
pub fn unsupported_statement(sql: &str) -> Option<String> {
    let dialect = SQLiteDialect {};
    let statements = Parser::parse_sql(&dialect, sql).ok()?;

    let mut unsupported = None;
    for statement in &statements {
        match statement {
            Statement::Query(_) | Statement::Insert(_) => {}
            Statement::Update { .. } => {
                unsupported.get_or_insert_with(|| "UPDATE".to_string());
            }
            Statement::Delete(_) => {
                unsupported.get_or_insert_with(|| "DELETE".to_string());
            }
            other => {
                let verb = other
                    .to_string()
                    .split_whitespace()
                    .next()
                    .map(str::to_uppercase);
                if let Some(verb) = verb {
                    unsupported.get_or_insert(verb);
                }
            }
        }
    }
    unsupported
}
