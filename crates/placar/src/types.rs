use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Sentinel for fields the source markup did not yield.
pub const NOT_AVAILABLE: &str = "N/A";

/// One legislator's entry in a roll call, in source-document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub name: String,
    pub party: String,
    /// Two-letter federative-unit code, or "N/A" for irregular entries.
    pub region: String,
    pub choice: String,
}

impl Display for VoteRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}-{}) — {}",
            self.name, self.party, self.region, self.choice
        )
    }
}

/// Everything extracted from a single voting page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub official_result: Option<String>,
    pub records: Vec<VoteRecord>,
}

impl Display for VoteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.official_result {
            Some(text) => writeln!(f, "Resultado oficial: {}", text)?,
            None => writeln!(f, "Resultado oficial: (não encontrado)")?,
        }
        for (i, record) in self.records.iter().enumerate() {
            writeln!(f, "{:>3}. {}", i + 1, record)?;
        }
        Ok(())
    }
}
