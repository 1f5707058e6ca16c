//! Records exchanged with the store

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PLAYER_NAME, MAX_NAME_CHARS};

/// The persisted best run: who, which seed, and when they jumped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostRecord {
    pub name: String,
    pub seed: u32,
    /// Jump times in ms since that run's start, ascending
    pub jumps: Vec<f64>,
    /// Unix timestamp (ms) of the run
    pub date: f64,
}

/// Current best score and the ghost that set it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    #[serde(rename = "highscore", default)]
    pub best_score: f64,
    #[serde(default)]
    pub ghost: Option<GhostRecord>,
}

/// A finished run offered as the new best
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: Option<String>,
    /// Seconds survived
    pub score: f64,
    #[serde(default)]
    pub seed: u32,
    #[serde(default)]
    pub jumps: Option<Vec<f64>>,
    #[serde(default)]
    pub date: Option<f64>,
}

impl Candidate {
    /// Stored form of the candidate's name
    pub fn normalized_name(&self) -> String {
        normalize_name(self.name.as_deref())
    }
}

/// Outcome of a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReply {
    pub updated: bool,
    #[serde(rename = "highscore")]
    pub best_score: f64,
    #[serde(default)]
    pub ghost: Option<GhostRecord>,
}

/// Trim, default empty names, and cap at `MAX_NAME_CHARS` characters
pub fn normalize_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.chars().take(MAX_NAME_CHARS).collect(),
        _ => DEFAULT_PLAYER_NAME.to_string(),
    }
}
