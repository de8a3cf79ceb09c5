//! Query interpreter for the narrow `planets` grammar.
//!
//! Input is normalized (trimmed, one trailing `;` removed, lower-cased) and
//! handed to the first rule in [`DISPATCH_ORDER`] that claims it. INSERT and
//! GROUP BY answers are scripted: they reward the shape of the statement,
//! not the values inside it.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::InterpreterError;
use crate::record::{is_known_field, Record, FIELDS, TABLE_NAME};

/// Categories reported by the scripted GROUP BY answer, in display order.
pub const AGGREGATE_TYPES: [&str; 6] =
    ["Ocean", "Volcanic", "Ice", "Jungle", "Gas Giant", "Desert"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Matching records in table order. `fields` is the projection to display.
    Select { rows: Vec<Record>, fields: Vec<String> },
    /// The record the caller should append.
    Insert { inserted: Record, fields: Vec<String> },
    Aggregate { rows: Vec<GroupCount>, fields: Vec<String> },
}

impl QueryResult {
    pub fn fields(&self) -> &[String] {
        match self {
            QueryResult::Select { fields, .. }
            | QueryResult::Insert { fields, .. }
            | QueryResult::Aggregate { fields, .. } => fields,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            QueryResult::Select { rows, .. } => rows.len(),
            QueryResult::Insert { .. } => 1,
            QueryResult::Aggregate { rows, .. } => rows.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Insert,
    GroupBy,
    Select,
}

/// Rules are tried in this order and the first one that applies wins.
pub const DISPATCH_ORDER: [Rule; 3] = [Rule::Insert, Rule::GroupBy, Rule::Select];

impl Rule {
    pub fn applies(self, text: &str) -> bool {
        match self {
            Rule::Insert => text.starts_with("insert into"),
            Rule::GroupBy => text.contains("group by") && text.contains("type"),
            Rule::Select => true,
        }
    }

    fn run(self, text: &str, table: &[Record]) -> Result<QueryResult, InterpreterError> {
        match self {
            Rule::Insert => run_insert(text, table),
            Rule::GroupBy => Ok(run_group_by()),
            Rule::Select => run_select(text, table),
        }
    }
}

pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
    trimmed.to_lowercase()
}

/// The rule that would handle `raw`, or `None` for empty input.
pub fn rule_for(raw: &str) -> Option<Rule> {
    let text = normalize(raw);
    if text.is_empty() {
        return None;
    }
    DISPATCH_ORDER.into_iter().find(|rule| rule.applies(&text))
}

pub fn interpret(raw: &str, table: &[Record]) -> Result<QueryResult, InterpreterError> {
    let text = normalize(raw);
    if text.is_empty() {
        return Err(InterpreterError::Empty);
    }
    let rule = DISPATCH_ORDER
        .into_iter()
        .find(|rule| rule.applies(&text))
        .unwrap_or(Rule::Select);
    debug!(?rule, rows = table.len(), "dispatching query");
    rule.run(&text, table)
}

fn all_fields() -> Vec<String> {
    FIELDS.iter().map(|field| field.to_string()).collect()
}

fn run_insert(text: &str, table: &[Record]) -> Result<QueryResult, InterpreterError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?s)^insert\s+into\s+planets\s*\((.+)\)\s*values\s*\((.+)\)$")
            .expect("valid insert regex")
    });
    if !re.is_match(text) {
        return Err(InterpreterError::Syntax("INSERT format incorrect".to_string()));
    }

    // The column and value lists are not read: every well-formed INSERT
    // lands the same scouted planet.
    let id = table.len() as u64 + 1;
    Ok(QueryResult::Insert {
        inserted: Record::new(id, "Zentari", "Unknown", 1.5, "Unknown"),
        fields: all_fields(),
    })
}

fn run_group_by() -> QueryResult {
    QueryResult::Aggregate {
        rows: AGGREGATE_TYPES
            .iter()
            .map(|key| GroupCount {
                key: key.to_string(),
                count: 1,
            })
            .collect(),
        fields: vec!["type".to_string(), "count".to_string()],
    }
}

fn run_select(text: &str, table: &[Record]) -> Result<QueryResult, InterpreterError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?s)^select\s+(.+?)\s+from\s+(\S+)(?:\s+where(?:\s+(.*))?)?$")
            .expect("valid select regex")
    });
    let Some(caps) = re.captures(text) else {
        return Err(InterpreterError::Syntax(
            "expected SELECT <fields> FROM <table> [WHERE <column> = <value>]".to_string(),
        ));
    };

    let table_name = caps.get(2).map_or("", |m| m.as_str()).trim();
    if table_name != TABLE_NAME {
        return Err(InterpreterError::UnknownTable(table_name.to_string()));
    }

    let field_list = caps.get(1).map_or("", |m| m.as_str()).trim();
    let fields = if field_list == "*" {
        all_fields()
    } else {
        let fields: Vec<String> = field_list
            .split(',')
            .map(|field| field.trim().to_string())
            .collect();
        // Aggregate-looking field lists are let through unchecked.
        if !field_list.contains("count") {
            if let Some(unknown) = fields.iter().find(|field| !is_known_field(field)) {
                return Err(InterpreterError::UnknownColumn(unknown.clone()));
            }
        }
        fields
    };

    let condition = caps.get(3).and_then(|m| parse_condition(m.as_str()));
    let rows = table
        .iter()
        .filter(|record| match &condition {
            Some((column, expected)) => record
                .get(column)
                .is_some_and(|value| value.to_string().to_lowercase() == *expected),
            None => true,
        })
        .cloned()
        .collect();

    Ok(QueryResult::Select { rows, fields })
}

/// Parses `column = value`. Anything else is treated as no condition.
fn parse_condition(clause: &str) -> Option<(String, String)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?s)^([a-z_][a-z0-9_]*)\s*=\s*(.+)$").expect("valid where regex")
    });
    let caps = re.captures(clause.trim())?;
    let column = caps.get(1)?.as_str().to_string();
    let value = unquote(caps.get(2)?.as_str().trim()).to_string();
    Some((column, value))
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::{interpret, normalize, rule_for, QueryResult, Rule, AGGREGATE_TYPES};
    use crate::error::InterpreterError;
    use crate::record::{seed_records, FIELDS};

    #[test]
    fn normalizes_terminator_and_case() {
        assert_eq!(normalize("  SELECT * FROM Planets ; "), "select * from planets");
        assert_eq!(normalize("select 1;;"), "select 1;");
    }

    #[test]
    fn rejects_empty_input() {
        let table = seed_records();
        assert_eq!(interpret("", &table), Err(InterpreterError::Empty));
        assert_eq!(interpret("  \n\t ", &table), Err(InterpreterError::Empty));
        assert_eq!(interpret(" ; ", &table), Err(InterpreterError::Empty));
    }

    #[test]
    fn selects_everything() {
        let table = seed_records();
        let result = interpret("select * from planets;", &table).unwrap();
        let QueryResult::Select { rows, fields } = result else {
            panic!("expected select");
        };
        assert_eq!(rows, table);
        assert_eq!(fields, FIELDS.to_vec());
    }

    #[test]
    fn projects_named_fields() {
        let table = seed_records();
        let result = interpret("SELECT name , gravity FROM planets", &table).unwrap();
        assert_eq!(result.fields(), ["name", "gravity"]);
        assert_eq!(result.row_count(), 5);
    }

    #[test]
    fn where_matches_case_insensitively() {
        let table = seed_records();
        for query in [
            "select * from planets where resource = 'Water'",
            "select * from planets where resource=\"WATER\"",
            "select * from planets where resource = water",
        ] {
            let QueryResult::Select { rows, .. } = interpret(query, &table).unwrap() else {
                panic!("expected select for {query}");
            };
            assert_eq!(rows.len(), 1, "{query}");
            assert_eq!(rows[0].resource, "Water");
        }
    }

    #[test]
    fn where_compares_numbers_as_text() {
        let table = seed_records();
        let by_gravity = interpret("select * from planets where gravity = 1", &table).unwrap();
        let by_id = interpret("select * from planets where id = 3", &table).unwrap();
        assert_eq!(by_gravity.row_count(), 1);
        assert_eq!(by_id.row_count(), 1);
    }

    #[test]
    fn malformed_where_is_ignored() {
        let table = seed_records();
        for query in [
            "select * from planets where gravity > 1",
            "select * from planets where",
            "select * from planets where resource",
        ] {
            assert_eq!(interpret(query, &table).unwrap().row_count(), 5, "{query}");
        }
    }

    #[test]
    fn where_on_unknown_column_matches_nothing() {
        let table = seed_records();
        let result = interpret("select * from planets where color = 'red'", &table).unwrap();
        assert_eq!(result.row_count(), 0);
    }

    #[test]
    fn unknown_table_is_named() {
        let table = seed_records();
        assert_eq!(
            interpret("select * from moons", &table),
            Err(InterpreterError::UnknownTable("moons".to_string()))
        );
    }

    #[test]
    fn unknown_column_is_named() {
        let table = seed_records();
        assert_eq!(
            interpret("select nonexistent_column from planets", &table),
            Err(InterpreterError::UnknownColumn("nonexistent_column".to_string()))
        );
    }

    #[test]
    fn count_skips_column_check() {
        let table = seed_records();
        let result = interpret("select count(*) from planets", &table).unwrap();
        assert_eq!(result.fields(), ["count(*)"]);
        assert_eq!(result.row_count(), 5);
        assert!(interpret("select nonexistent_column, count from planets", &table).is_ok());
    }

    #[test]
    fn unrecognized_statement_is_syntax_error() {
        let table = seed_records();
        for query in [
            "update planets set name = 'x'",
            "select * from planets order by id",
            "hello",
        ] {
            let result = interpret(query, &table);
            assert!(matches!(result, Err(InterpreterError::Syntax(_))), "{query}");
        }
    }

    // INSERT ignores the supplied columns and values on purpose.
    #[test]
    fn insert_manufactures_fixed_record() {
        let table = seed_records();
        let query = "INSERT INTO planets (name, type) VALUES ('Kepler', 'Rocky');";
        let QueryResult::Insert { inserted, fields } = interpret(query, &table).unwrap() else {
            panic!("expected insert");
        };
        assert_eq!(inserted.id, 6);
        assert_eq!(inserted.name, "Zentari");
        assert_eq!(inserted.kind, "Unknown");
        assert_eq!(inserted.gravity, 1.5);
        assert_eq!(inserted.resource, "Unknown");
        assert_eq!(fields, FIELDS.to_vec());
    }

    #[test]
    fn malformed_insert_is_rejected() {
        let table = seed_records();
        for query in [
            "insert into planets values ('x')",
            "insert into moons (name) values ('x')",
            "insert into planets (name) values",
        ] {
            assert_eq!(
                interpret(query, &table),
                Err(InterpreterError::Syntax("INSERT format incorrect".to_string())),
                "{query}"
            );
        }
    }

    #[test]
    fn group_by_is_scripted() {
        let result = interpret("select type, count(*) from planets group by type", &[]).unwrap();
        let QueryResult::Aggregate { rows, fields } = result else {
            panic!("expected aggregate");
        };
        assert_eq!(fields, ["type", "count"]);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.count == 1));
        let keys: Vec<&str> = rows.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, AGGREGATE_TYPES);
    }

    #[test]
    fn dispatch_order_is_first_match() {
        assert_eq!(rule_for("insert into planets (type) values ('group by')"), Some(Rule::Insert));
        assert_eq!(rule_for("select type from moons group by type"), Some(Rule::GroupBy));
        assert_eq!(rule_for("select name from planets group by name"), Some(Rule::Select));
        assert_eq!(rule_for("   "), None);
    }

    #[test]
    fn repeated_select_is_identical() {
        let table = seed_records();
        let query = "select name, resource from planets where type = 'ice'";
        assert_eq!(interpret(query, &table), interpret(query, &table));
    }
}
