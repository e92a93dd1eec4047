//! Ledger models
//!
//! The ledger is a session-lifetime, append-only list of integrity records.
//! Each record carries a non-cryptographic fingerprint of the snapshot it was
//! created from; see [`crate::fingerprint`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::fingerprint::fingerprint;
use crate::models::WeatherSnapshot;

/// What the weather data will be used for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum UseCase {
    #[default]
    #[serde(rename = "General Inquiry")]
    General,
    #[serde(rename = "Agriculture")]
    Agriculture,
    #[serde(rename = "Disaster Management")]
    DisasterManagement,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Insurance")]
    Insurance,
}

impl UseCase {
    /// All use cases, in form order
    pub const ALL: [UseCase; 5] = [
        UseCase::General,
        UseCase::Agriculture,
        UseCase::DisasterManagement,
        UseCase::Transport,
        UseCase::Insurance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UseCase::General => "General Inquiry",
            UseCase::Agriculture => "Agriculture",
            UseCase::DisasterManagement => "Disaster Management",
            UseCase::Transport => "Transport",
            UseCase::Insurance => "Insurance",
        }
    }

    /// Critical use cases are logged to the ledger
    pub fn is_critical(&self) -> bool {
        !matches!(self, UseCase::General)
    }
}

impl std::fmt::Display for UseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UseCase {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UseCase::ALL
            .into_iter()
            .find(|uc| uc.label().eq_ignore_ascii_case(s.trim()))
            .ok_or("Unknown use case")
    }
}

/// One integrity record ("block")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub use_case: UseCase,
    pub temperature: f64,
    pub humidity: f64,
    pub data_hash: String,
}

/// Append-only ledger. Entries are never mutated or removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot fetched for `location` under `use_case`.
    ///
    /// The id is assigned here, from the ledger's length at append time.
    pub fn append(
        &mut self,
        created_at: DateTime<Utc>,
        location: &str,
        use_case: UseCase,
        snapshot: &WeatherSnapshot,
    ) -> &LedgerEntry {
        let entry = LedgerEntry {
            id: self.entries.len() as u64 + 1,
            timestamp: created_at,
            location: location.to_string(),
            use_case,
            temperature: snapshot.current.temp_c,
            humidity: snapshot.current.humidity,
            data_hash: fingerprint(snapshot),
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&LedgerEntry> {
        id.checked_sub(1)
            .and_then(|idx| self.entries.get(idx as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, CurrentConditions, LocationInfo};

    fn snapshot(temp_c: f64, humidity: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            location: LocationInfo {
                name: "Tulsa".to_string(),
                region: "Oklahoma".to_string(),
                country: "USA".to_string(),
                localtime: "2024-05-03 14:00".to_string(),
            },
            current: CurrentConditions {
                last_updated: "2024-05-03 13:45".to_string(),
                temp_c,
                condition: Condition {
                    text: "Sunny".to_string(),
                    icon: String::new(),
                },
                wind_kph: 12.0,
                pressure_mb: 1015.0,
                humidity,
            },
            historical: vec![],
            insights: "Calm.".to_string(),
        }
    }

    #[test]
    fn test_use_case_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&UseCase::DisasterManagement).unwrap();
        assert_eq!(json, "\"Disaster Management\"");
        let parsed: UseCase = serde_json::from_str("\"General Inquiry\"").unwrap();
        assert_eq!(parsed, UseCase::General);
    }

    #[test]
    fn test_only_general_is_non_critical() {
        assert!(!UseCase::General.is_critical());
        assert!(UseCase::Agriculture.is_critical());
        assert!(UseCase::DisasterManagement.is_critical());
        assert!(UseCase::Transport.is_critical());
        assert!(UseCase::Insurance.is_critical());
    }

    #[test]
    fn test_use_case_from_str() {
        assert_eq!("insurance".parse::<UseCase>(), Ok(UseCase::Insurance));
        assert_eq!(" Transport ".parse::<UseCase>(), Ok(UseCase::Transport));
        assert!("Mining".parse::<UseCase>().is_err());
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut ledger = Ledger::new();
        let now = Utc::now();
        ledger.append(now, "Tulsa, USA", UseCase::Agriculture, &snapshot(21.4, 55.0));
        ledger.append(now, "Oslo, Norway", UseCase::Transport, &snapshot(3.0, 80.0));

        let ids: Vec<u64> = ledger.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(ledger.get(2).map(|e| e.location.as_str()), Some("Oslo, Norway"));
        assert!(ledger.get(0).is_none());
        assert!(ledger.get(3).is_none());
    }

    #[test]
    fn test_append_copies_current_readings() {
        let mut ledger = Ledger::new();
        let snap = snapshot(21.4, 55.0);
        let entry = ledger
            .append(Utc::now(), "Tulsa, USA", UseCase::Agriculture, &snap)
            .clone();

        assert_eq!(entry.temperature, 21.4);
        assert_eq!(entry.humidity, 55.0);
        assert_eq!(entry.data_hash, fingerprint(&snap));
    }

    #[test]
    fn test_entry_wire_format() {
        let mut ledger = Ledger::new();
        ledger.append(Utc::now(), "Tulsa, USA", UseCase::Agriculture, &snapshot(21.4, 55.0));
        let value = serde_json::to_value(&ledger).unwrap();
        let first = &value[0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["useCase"], "Agriculture");
        assert!(first["dataHash"].as_str().unwrap().starts_with("0x"));
    }
}
