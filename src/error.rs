use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    EmptyInput,
    Syntax,
    UnknownTable,
    UnknownColumn,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    #[error("Query is empty. Type a command before transmitting.")]
    Empty,
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error("Table '{0}' does not exist")]
    UnknownTable(String),
    #[error("Column '{0}' does not exist")]
    UnknownColumn(String),
}

impl InterpreterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InterpreterError::Empty => ErrorCategory::EmptyInput,
            InterpreterError::Syntax(_) => ErrorCategory::Syntax,
            InterpreterError::UnknownTable(_) => ErrorCategory::UnknownTable,
            InterpreterError::UnknownColumn(_) => ErrorCategory::UnknownColumn,
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("record id {id} does not follow last id {last}")]
    IdNotIncreasing { id: u64, last: u64 },
}

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("mission catalog is empty")]
    EmptyCampaign,
    #[error("failed to parse mission catalog: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("campaign complete: no mission after the last one")]
    CampaignComplete,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("current mission is not complete yet")]
    MissionNotComplete,
    #[error(transparent)]
    Mission(#[from] MissionError),
    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
