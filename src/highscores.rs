//! Locally cached best score and ghost
//!
//! Refreshed from the store at startup and whenever a submission reply
//! arrives. Runs read it only when they start.

use crate::persistence::{GhostRecord, Standing, SubmitReply};

/// Best run as last reported by the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestRun {
    pub score: f64,
    pub ghost: Option<GhostRecord>,
}

impl BestRun {
    /// Create empty cache (score 0, no ghost)
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would become the new best
    pub fn beats(&self, score: f64) -> bool {
        score > self.score
    }

    /// Replace the cache with a standing read from the store
    pub fn apply(&mut self, standing: &Standing) {
        self.score = standing.best_score;
        self.ghost = standing.ghost.clone();
    }

    /// Fold in a submission reply. A reply without a ghost keeps the cached one.
    pub fn apply_reply(&mut self, reply: &SubmitReply) {
        self.score = reply.best_score;
        if reply.ghost.is_some() {
            self.ghost = reply.ghost.clone();
        }
    }

    /// Best score as shown in the HUD
    pub fn score_label(&self) -> String {
        format!("{:.1}", self.score)
    }

    /// " • Ghost: name — date" suffix, empty when there is no ghost
    pub fn ghost_label(&self) -> String {
        match &self.ghost {
            Some(ghost) => format!(" • Ghost: {} — {}", ghost.name, format_date(ghost.date)),
            None => String::new(),
        }
    }
}

/// Format a timestamp as a relative date string
#[cfg(target_arch = "wasm32")]
pub fn format_date(timestamp: f64) -> String {
    let now = js_sys::Date::now();
    let diff_mins = (now - timestamp) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i32;
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp));
            format!(
                "{}/{}/{}",
                date.get_month() + 1,
                date.get_date(),
                date.get_full_year() % 100
            )
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i32;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i32;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_date(_timestamp: f64) -> String {
    "N/A".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghost(name: &str) -> GhostRecord {
        GhostRecord {
            name: name.into(),
            seed: 1,
            jumps: vec![100.0],
            date: 0.0,
        }
    }

    #[test]
    fn test_beats_is_strict() {
        let mut best = BestRun::new();
        assert!(best.beats(0.1));
        best.score = 5.0;
        assert!(!best.beats(5.0));
        assert!(best.beats(5.01));
    }

    #[test]
    fn test_apply_standing_replaces_ghost() {
        let mut best = BestRun::new();
        best.apply(&Standing {
            best_score: 7.0,
            ghost: Some(ghost("ada")),
        });
        assert_eq!(best.score_label(), "7.0");
        assert_eq!(best.ghost_label(), " • Ghost: ada — N/A");

        best.apply(&Standing::default());
        assert!(best.ghost.is_none());
        assert_eq!(best.ghost_label(), "");
    }

    #[test]
    fn test_reply_without_ghost_keeps_cached() {
        let mut best = BestRun {
            score: 3.0,
            ghost: Some(ghost("ada")),
        };
        best.apply_reply(&SubmitReply {
            updated: false,
            best_score: 4.0,
            ghost: None,
        });
        assert_eq!(best.score, 4.0);
        assert_eq!(best.ghost.unwrap().name, "ada");
    }
}
