//! Combat logging
//!
//! Records all combat events for display and post-match analysis. Damage,
//! healing and death entries carry structured data alongside the
//! human-readable message so result screens and tests can aggregate without
//! parsing strings. The whole log can be saved as JSON together with match
//! metadata after a headless run.

use std::collections::HashMap;

use serde::Serialize;

/// Identifier of a combatant in log entries ("Player" / "Enemy").
pub type CombatantId = String;

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Timestamp in match time (seconds since match start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Structured payload for aggregation queries (damage/healing/death)
    pub data: Option<StructuredEventData>,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    /// Damage dealt
    Damage,
    /// Healing done
    Healing,
    /// Status effect applied (bleed, stun)
    StatusApplied,
    /// Status effect expired
    StatusExpired,
    /// Combatant died
    Death,
    /// Match event (start, end, etc.)
    MatchEvent,
}

/// Structured payload attached to damage/healing/death entries.
#[derive(Debug, Clone, Serialize)]
pub enum StructuredEventData {
    Damage {
        source: CombatantId,
        target: CombatantId,
        /// Damage kind label ("Normal", "Crit", "Execute", "Bleed", "Thorns")
        kind: String,
        amount: i32,
        killing_blow: bool,
    },
    Healing {
        target: CombatantId,
        /// What produced the healing ("Regen", "Lifesteal")
        source: String,
        amount: i32,
    },
    Death {
        victim: CombatantId,
        killer: Option<CombatantId>,
    },
}

/// The combat log storing all events of one match
#[derive(Debug, Default)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current match time
    pub match_time: f32,
}

impl CombatLog {
    /// Clear the log for a new match
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
            data: None,
        });
    }

    /// Add a damage entry with structured data
    pub fn log_damage(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        kind: String,
        amount: i32,
        killing_blow: bool,
        message: String,
    ) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type: CombatLogEventType::Damage,
            message,
            data: Some(StructuredEventData::Damage {
                source,
                target,
                kind,
                amount,
                killing_blow,
            }),
        });
    }

    /// Add a healing entry with structured data
    pub fn log_healing(&mut self, target: CombatantId, source: String, amount: i32, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type: CombatLogEventType::Healing,
            message,
            data: Some(StructuredEventData::Healing {
                target,
                source,
                amount,
            }),
        });
    }

    /// Add a death entry with killer tracking
    pub fn log_death(&mut self, victim: CombatantId, killer: Option<CombatantId>, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type: CombatLogEventType::Death,
            message,
            data: Some(StructuredEventData::Death { victim, killer }),
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get only HP-changing events (damage and healing)
    pub fn hp_changes_only(&self) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.event_type,
                    CombatLogEventType::Damage | CombatLogEventType::Healing
                )
            })
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Total damage dealt per damage kind by one combatant
    pub fn damage_by_kind(&self, combatant: &str) -> HashMap<String, i32> {
        let mut totals = HashMap::new();
        for entry in &self.entries {
            if let Some(StructuredEventData::Damage {
                source, kind, amount, ..
            }) = &entry.data
            {
                if source == combatant {
                    *totals.entry(kind.clone()).or_insert(0) += amount;
                }
            }
        }
        totals
    }

    /// Total damage dealt by one combatant across all kinds
    pub fn total_damage_dealt(&self, combatant: &str) -> i32 {
        self.damage_by_kind(combatant).values().sum()
    }

    /// Number of killing blows landed by one combatant
    pub fn killing_blows(&self, combatant: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| {
                matches!(
                    &entry.data,
                    Some(StructuredEventData::Damage {
                        source,
                        killing_blow: true,
                        ..
                    }) if source == combatant
                )
            })
            .count()
    }

    /// Save the log as JSON together with match metadata.
    /// Returns the path written on success.
    pub fn save_to_file(&self, metadata: &MatchMetadata, path: &str) -> Result<String, String> {
        #[derive(Serialize)]
        struct MatchReport<'a> {
            metadata: &'a MatchMetadata,
            entries: &'a [CombatLogEntry],
        }

        let report = MatchReport {
            metadata,
            entries: &self.entries,
        };

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize match report: {}", e))?;

        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;

        Ok(path.to_string())
    }
}

/// Match-level metadata saved alongside the log entries.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetadata {
    /// Final outcome label ("PlayerWin", "EnemyWin", "Draw")
    pub outcome: String,
    /// Ticks the combat clock advanced
    pub ticks: u64,
    /// Real match duration in seconds
    pub match_time: f32,
    /// Seed used (if deterministic mode)
    pub random_seed: Option<u64>,
    pub player: FighterMetadata,
    pub enemy: FighterMetadata,
}

/// Per-fighter summary included in the match metadata.
#[derive(Debug, Clone, Serialize)]
pub struct FighterMetadata {
    pub max_hp: i32,
    pub final_hp: i32,
    pub survived: bool,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    /// Ids of the upgrades applied before the fight
    pub upgrades: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_type() {
        let mut log = CombatLog::default();
        log.log(CombatLogEventType::MatchEvent, "start".to_string());
        log.log_damage(
            "Player".to_string(),
            "Enemy".to_string(),
            "Normal".to_string(),
            10,
            false,
            "Player hits Enemy for 10 damage".to_string(),
        );

        assert_eq!(log.filter_by_type(CombatLogEventType::Damage).len(), 1);
        assert_eq!(log.filter_by_type(CombatLogEventType::MatchEvent).len(), 1);
        assert_eq!(log.hp_changes_only().len(), 1);
    }

    #[test]
    fn test_recent_returns_chronological_tail() {
        let mut log = CombatLog::default();
        for i in 0..5 {
            log.log(CombatLogEventType::MatchEvent, format!("event {}", i));
        }
        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "event 3");
        assert_eq!(recent[1].message, "event 4");
    }

    #[test]
    fn test_clear_resets_time_and_entries() {
        let mut log = CombatLog::default();
        log.match_time = 12.0;
        log.log(CombatLogEventType::MatchEvent, "x".to_string());
        log.clear();
        assert!(log.entries.is_empty());
        assert_eq!(log.match_time, 0.0);
    }
}
