//! Knowledge base model: the authoritative fact table for the supported
//! schemes plus platform statement-download instructions.
//!
//! The knowledge base is loaded once at startup and passed around as an
//! immutable, explicitly constructed value so pipeline components can be
//! tested against fixture data.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::Result;

/// The kind of fact a knowledge base entry (or vector store record) carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactType {
    ExpenseRatio,
    ExitLoad,
    MinimumSip,
    MinimumLumpSum,
    LockIn,
    Riskometer,
    Benchmark,
    StatementDownload,
}

impl FactType {
    /// Human-readable label, used in canonical fact texts and messages
    pub fn label(self) -> &'static str {
        match self {
            Self::ExpenseRatio => "expense ratio",
            Self::ExitLoad => "exit load",
            Self::MinimumSip => "minimum sip",
            Self::MinimumLumpSum => "minimum lump sum",
            Self::LockIn => "lock in",
            Self::Riskometer => "riskometer",
            Self::Benchmark => "benchmark",
            Self::StatementDownload => "statement download",
        }
    }
}

impl fmt::Display for FactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Expense ratio payload: always a direct/regular pair sharing one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRatio {
    pub direct: String,
    pub regular: String,
    pub source_url: String,
}

/// Payload for single-valued fact types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactValue {
    pub value: String,
    pub source_url: String,
}

/// All facts recorded for one scheme. Every field is optional; not every
/// scheme carries every fact (lock-in only applies to ELSS).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_ratio: Option<ExpenseRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_load: Option<FactValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_sip: Option<FactValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_lump_sum: Option<FactValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_in: Option<FactValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riskometer: Option<FactValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<FactValue>,
}

impl SchemeFacts {
    /// Look up a single-valued fact. Expense ratio and statement download
    /// are structured differently and return `None` here.
    pub fn get(&self, fact_type: FactType) -> Option<&FactValue> {
        match fact_type {
            FactType::ExitLoad => self.exit_load.as_ref(),
            FactType::MinimumSip => self.minimum_sip.as_ref(),
            FactType::MinimumLumpSum => self.minimum_lump_sum.as_ref(),
            FactType::LockIn => self.lock_in.as_ref(),
            FactType::Riskometer => self.riskometer.as_ref(),
            FactType::Benchmark => self.benchmark.as_ref(),
            FactType::ExpenseRatio | FactType::StatementDownload => None,
        }
    }

    /// Iterate the single-valued facts present on this scheme, in a fixed
    /// order. The expense ratio pair is handled separately by callers.
    pub fn simple_facts(&self) -> impl Iterator<Item = (FactType, &FactValue)> {
        const ORDER: [FactType; 6] = [
            FactType::ExitLoad,
            FactType::MinimumSip,
            FactType::MinimumLumpSum,
            FactType::LockIn,
            FactType::Riskometer,
            FactType::Benchmark,
        ];
        ORDER
            .into_iter()
            .filter_map(|fact_type| self.get(fact_type).map(|fact| (fact_type, fact)))
    }
}

/// Statement-download instructions for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub description: String,
    pub source_url: String,
}

/// The full knowledge base: scheme facts plus platform download entries.
///
/// `BTreeMap` keeps iteration order deterministic, which the offline
/// embedding build relies on for reproducible snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub schemes: BTreeMap<String, SchemeFacts>,
    pub statement_download: BTreeMap<String, PlatformInfo>,
}

impl KnowledgeBase {
    /// Load the knowledge base from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let knowledge: KnowledgeBase = serde_json::from_str(&content)?;
        Ok(knowledge)
    }

    /// Look up a scheme by its full name
    pub fn scheme(&self, name: &str) -> Option<&SchemeFacts> {
        self.schemes.get(name)
    }

    /// Look up a statement-download platform by name (lowercase keys)
    pub fn platform(&self, name: &str) -> Option<&PlatformInfo> {
        self.statement_download.get(name)
    }
}
