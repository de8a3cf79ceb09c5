use std::fmt;

use serde::Serialize;

use crate::interpreter::QueryResult;
use crate::record::Value;

/// Display-ready projection of a [`QueryResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub fields: Vec<String>,
    /// One cell per field; `None` where the record has no such column.
    pub rows: Vec<Vec<Option<Value>>>,
}

impl ResultTable {
    pub fn from_result(result: &QueryResult) -> Self {
        let fields = result.fields().to_vec();
        let rows = match result {
            QueryResult::Select { rows, .. } => rows
                .iter()
                .map(|record| fields.iter().map(|field| record.get(field)).collect())
                .collect(),
            QueryResult::Insert { inserted, .. } => {
                vec![fields.iter().map(|field| inserted.get(field)).collect()]
            }
            QueryResult::Aggregate { rows, .. } => rows
                .iter()
                .map(|group| {
                    fields
                        .iter()
                        .map(|field| match field.as_str() {
                            "type" => Some(Value::Text(group.key.clone())),
                            "count" => Some(Value::Int(group.count)),
                            _ => None,
                        })
                        .collect()
                })
                .collect(),
        };
        Self { fields, rows }
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default())
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(String::len)
                    .fold(field.len(), usize::max)
            })
            .collect();

        let header: Vec<String> = self
            .fields
            .iter()
            .zip(&widths)
            .map(|(field, &width)| format!("{field:<width$}"))
            .collect();
        writeln!(f, "{}", header.join(" | "))?;
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", line.join(" | "))?;
        }
        write!(f, "({} row{})", self.rows.len(), if self.rows.len() == 1 { "" } else { "s" })
    }
}
