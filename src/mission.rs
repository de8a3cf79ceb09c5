use serde::{Deserialize, Serialize};

use crate::error::MissionError;
use crate::interpreter::QueryResult;

const CATALOG_JSON: &str = include_str!("../data/missions.json");

/// Which success check a mission uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionGoal {
    ListAllPlanets,
    FindWaterPlanet,
    InsertPlanet,
    GroupByType,
}

impl MissionGoal {
    /// `_raw` is the query as typed; no current goal looks at it.
    pub fn is_met(self, result: &QueryResult, _raw: &str) -> bool {
        match (self, result) {
            (MissionGoal::ListAllPlanets, QueryResult::Select { rows, .. }) => rows.len() >= 5,
            (MissionGoal::FindWaterPlanet, QueryResult::Select { rows, .. }) => {
                rows.len() == 1 && rows[0].resource == "Water"
            }
            (MissionGoal::InsertPlanet, QueryResult::Insert { .. }) => true,
            (MissionGoal::GroupByType, QueryResult::Aggregate { .. }) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: u32,
    pub title: String,
    pub briefing: String,
    pub hint: String,
    pub extra_hint: String,
    pub placeholder: String,
    pub goal: MissionGoal,
    pub success_text: String,
}

/// The built-in campaign, in play order.
pub fn catalog() -> Result<Vec<Mission>, MissionError> {
    Ok(serde_json::from_str(CATALOG_JSON)?)
}

#[derive(Debug, Clone)]
pub struct MissionEngine {
    missions: Vec<Mission>,
    index: usize,
}

impl MissionEngine {
    pub fn new(missions: Vec<Mission>) -> Result<Self, MissionError> {
        if missions.is_empty() {
            return Err(MissionError::EmptyCampaign);
        }
        Ok(Self { missions, index: 0 })
    }

    pub fn standard() -> Result<Self, MissionError> {
        Self::new(catalog()?)
    }

    pub fn current(&self) -> &Mission {
        &self.missions[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.missions.len()
    }

    pub fn evaluate(&self, result: &QueryResult, raw: &str) -> bool {
        self.current().goal.is_met(result, raw)
    }

    /// Moves to the next mission. At the last mission the index is left alone.
    pub fn advance(&mut self) -> Result<(), MissionError> {
        if self.is_last() {
            return Err(MissionError::CampaignComplete);
        }
        self.index += 1;
        Ok(())
    }
}
