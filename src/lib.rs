//! Starquery: a mission-driven game that teaches a small slice of SQL.
//!
//! Queries run against one in-memory `planets` table. Each mission checks
//! the interpreter's answer and the session moves through a linear campaign.

pub mod config;
pub mod error;
pub mod format;
pub mod interpreter;
pub mod mission;
pub mod record;
pub mod route;
pub mod session;
pub mod table;

pub use config::GameConfig;
pub use error::{
    ConfigError, ErrorCategory, InterpreterError, MissionError, SessionError, TableError,
};
pub use format::ResultTable;
pub use interpreter::{interpret, rule_for, GroupCount, QueryResult, Rule, DISPATCH_ORDER};
pub use mission::{catalog, Mission, MissionEngine, MissionGoal};
pub use record::{Record, Value, FIELDS, TABLE_NAME};
pub use route::{unsupported_statement, StatementKind};
pub use session::{
    HistoryEntry, LevelState, MissionView, SceneObserver, SceneSignal, SessionController,
    SessionView, MISMATCH_MESSAGE,
};
pub use table::TableStore;
