use std::fmt;

use serde::Serialize;

pub const TABLE_NAME: &str = "planets";

/// Column order used by `select *` and by INSERT results.
pub const FIELDS: [&str; 5] = ["id", "name", "type", "gravity", "resource"];

/// A single cell as shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub gravity: f64,
    pub resource: String,
}

impl Record {
    pub fn new(id: u64, name: &str, kind: &str, gravity: f64, resource: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            gravity,
            resource: resource.to_string(),
        }
    }

    pub fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Int(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            "type" => Some(Value::Text(self.kind.clone())),
            "gravity" => Some(Value::Float(self.gravity)),
            "resource" => Some(Value::Text(self.resource.clone())),
            _ => None,
        }
    }
}

pub fn is_known_field(field: &str) -> bool {
    FIELDS.contains(&field)
}

/// The five planets every session starts with.
pub fn seed_records() -> Vec<Record> {
    vec![
        Record::new(1, "Aqualis", "Ocean", 1.1, "Water"),
        Record::new(2, "Pyros", "Volcanic", 2.3, "Iron"),
        Record::new(3, "Glacia", "Ice", 0.8, "Helium"),
        Record::new(4, "Verdantia", "Jungle", 1.0, "Oxygen"),
        Record::new(5, "Nebulon", "Gas Giant", 3.4, "Hydrogen"),
    ]
}
