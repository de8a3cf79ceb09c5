//! Session controller: runs one submission at a time through the
//! interpreter, the table store and the mission engine, and keeps the
//! state the presentation layer reads back through [`SessionController::view`].

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{InterpreterError, SessionError};
use crate::format::ResultTable;
use crate::interpreter::{interpret, QueryResult};
use crate::mission::{Mission, MissionEngine};
use crate::record::Record;
use crate::route::{unsupported_statement, StatementKind};
use crate::table::TableStore;

/// Shown when a query runs cleanly but does not satisfy the mission.
pub const MISMATCH_MESSAGE: &str = "Your query ran, but it did not complete the mission. \
     Read the briefing again and adjust your query.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelState {
    Idle,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub query: String,
    pub outcome: String,
    pub statement: StatementKind,
}

/// What the scene renderer is told after a level-state or mission change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SceneSignal {
    pub mission_id: u32,
    pub state: LevelState,
}

pub trait SceneObserver {
    fn on_signal(&mut self, signal: SceneSignal);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionView {
    pub index: usize,
    pub total: usize,
    pub id: u32,
    pub title: String,
    pub briefing: String,
    pub hint: String,
    pub extra_hint: Option<String>,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub mission: MissionView,
    pub state: LevelState,
    pub result: Option<ResultTable>,
    pub error: Option<String>,
    pub success_text: Option<String>,
    pub campaign_complete: bool,
    pub history: Vec<HistoryEntry>,
}

pub struct SessionController {
    missions: MissionEngine,
    table: TableStore,
    state: LevelState,
    last_result: Option<QueryResult>,
    last_error: Option<String>,
    extra_hint_revealed: bool,
    preserved_input: Option<String>,
    history: VecDeque<HistoryEntry>,
    observer: Option<Box<dyn SceneObserver>>,
}

impl SessionController {
    /// A fresh session on the built-in campaign and seed table.
    pub fn new() -> Result<Self, SessionError> {
        Ok(Self::with_missions(MissionEngine::standard()?))
    }

    pub fn with_missions(missions: MissionEngine) -> Self {
        Self {
            missions,
            table: TableStore::seeded(),
            state: LevelState::Idle,
            last_result: None,
            last_error: None,
            extra_hint_revealed: false,
            preserved_input: None,
            history: VecDeque::new(),
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn SceneObserver>) {
        self.observer = Some(observer);
        self.notify();
    }

    pub fn submit(&mut self, raw: &str) -> Result<LevelState, SessionError> {
        let mission_id = self.missions.current().id;
        let interpreted = interpret(raw, self.table.snapshot());
        let statement = StatementKind::of(interpreted.as_ref());
        debug!(mission = mission_id, statement = statement.as_str(), "query submitted");

        let (state, outcome) = match interpreted {
            Err(err) => {
                warn!(
                    mission = mission_id,
                    category = ?err.category(),
                    error = %err,
                    "query rejected"
                );
                let message = err.to_string();
                let outcome = match (&err, unsupported_statement(raw)) {
                    (InterpreterError::Syntax(_), Some(verb)) => {
                        format!("{message}; {verb} is not available on this terminal")
                    }
                    _ => message.clone(),
                };
                self.last_result = None;
                self.last_error = Some(message);
                self.preserved_input = Some(raw.to_string());
                (LevelState::Error, outcome)
            }
            Ok(result) => {
                if let QueryResult::Insert { inserted, .. } = &result {
                    self.table.append(inserted.clone())?;
                }
                let met = self.missions.evaluate(&result, raw);
                let summary = describe(&result);
                self.last_result = Some(result);
                if met {
                    info!(mission = mission_id, "mission complete");
                    self.last_error = None;
                    self.preserved_input = None;
                    (LevelState::Success, format!("{summary}; mission complete"))
                } else {
                    self.last_error = Some(MISMATCH_MESSAGE.to_string());
                    self.preserved_input = Some(raw.to_string());
                    (LevelState::Error, format!("{summary}; mission not satisfied"))
                }
            }
        };

        self.history.push_front(HistoryEntry {
            query: raw.trim().to_string(),
            outcome,
            statement,
        });
        self.set_state(state);
        Ok(state)
    }

    /// Moves on after a completed mission.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.state != LevelState::Success {
            return Err(SessionError::MissionNotComplete);
        }
        self.missions.advance()?;
        self.last_result = None;
        self.last_error = None;
        self.extra_hint_revealed = false;
        self.preserved_input = None;
        self.state = LevelState::Idle;
        info!(mission = self.missions.current().id, "mission started");
        self.notify();
        Ok(())
    }

    pub fn reveal_extra_hint(&mut self) -> &str {
        self.extra_hint_revealed = true;
        &self.missions.current().extra_hint
    }

    pub fn current_mission(&self) -> &Mission {
        self.missions.current()
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn table(&self) -> &[Record] {
        self.table.snapshot()
    }

    pub fn last_result(&self) -> Option<&QueryResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The input of the last failed submission, kept for editing.
    pub fn preserved_input(&self) -> Option<&str> {
        self.preserved_input.as_deref()
    }

    /// Most recent first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn is_campaign_complete(&self) -> bool {
        self.state == LevelState::Success && self.missions.is_last()
    }

    pub fn view(&self) -> SessionView {
        let mission = self.missions.current();
        SessionView {
            mission: MissionView {
                index: self.missions.index(),
                total: self.missions.len(),
                id: mission.id,
                title: mission.title.clone(),
                briefing: mission.briefing.clone(),
                hint: mission.hint.clone(),
                extra_hint: self
                    .extra_hint_revealed
                    .then(|| mission.extra_hint.clone()),
                placeholder: mission.placeholder.clone(),
            },
            state: self.state,
            result: self.last_result.as_ref().map(ResultTable::from_result),
            error: self.last_error.clone(),
            success_text: (self.state == LevelState::Success).then(|| mission.success_text.clone()),
            campaign_complete: self.is_campaign_complete(),
            history: self.history.iter().cloned().collect(),
        }
    }

    fn set_state(&mut self, state: LevelState) {
        if self.state != state {
            self.state = state;
            self.notify();
        }
    }

    fn notify(&mut self) {
        let signal = SceneSignal {
            mission_id: self.missions.current().id,
            state: self.state,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.on_signal(signal);
        }
    }
}

fn describe(result: &QueryResult) -> String {
    match result {
        QueryResult::Select { rows, .. } => match rows.len() {
            1 => "1 row returned".to_string(),
            n => format!("{n} rows returned"),
        },
        QueryResult::Insert { inserted, .. } => format!("1 row inserted (id {})", inserted.id),
        QueryResult::Aggregate { rows, .. } => format!("{} groups counted", rows.len()),
    }
}
