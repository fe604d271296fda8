use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

use serde::Serialize;

use crate::types::VoteRecord;

/// The fixed column set shared by every tally. Order matters for display.
pub const VOTE_CHOICES: [&str; 4] = ["Sim", "Não", "Abstenção", "Ausente"];

/// Zero-filled counts for the four canonical vote choices. Choice text
/// outside the canonical set is not a column and is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChoiceCounts {
    #[serde(rename = "Sim")]
    pub sim: u32,
    #[serde(rename = "Não")]
    pub nao: u32,
    #[serde(rename = "Abstenção")]
    pub abstencao: u32,
    #[serde(rename = "Ausente")]
    pub ausente: u32,
}

impl ChoiceCounts {
    pub fn add(&mut self, choice: &str) {
        match choice {
            "Sim" => self.sim += 1,
            "Não" => self.nao += 1,
            "Abstenção" => self.abstencao += 1,
            "Ausente" => self.ausente += 1,
            _ => {}
        }
    }

    /// The counts as `(label, count)` pairs in [`VOTE_CHOICES`] order.
    pub fn rows(&self) -> [(&'static str, u32); 4] {
        [
            ("Sim", self.sim),
            ("Não", self.nao),
            ("Abstenção", self.abstencao),
            ("Ausente", self.ausente),
        ]
    }

    pub fn total(&self) -> u32 {
        self.sim + self.nao + self.abstencao + self.ausente
    }
}

impl Display for ChoiceCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (label, count) in self.rows() {
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{}: {}", label, count)?;
            first = false;
        }
        Ok(())
    }
}

/// One row of the party crosstab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyRow {
    pub party: String,
    #[serde(flatten)]
    pub counts: ChoiceCounts,
}

/// Crosstab of party × vote choice, rows sorted by "Sim" count
/// descending with alphabetical party order as the tie-break.
///
/// Party labels keep their source casing: "PP" and "pp" are distinct
/// rows here even though scoreboard membership tests treat them as the
/// same party. Only the documented alias table rewrites labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PartyTally {
    rows: Vec<PartyRow>,
}

impl PartyTally {
    /// Recomputed from scratch on every call; holds no state between
    /// invocations.
    pub fn from_records(records: &[VoteRecord]) -> Self {
        let mut grouped: BTreeMap<String, ChoiceCounts> = BTreeMap::new();
        for record in records {
            grouped
                .entry(record.party.clone())
                .or_default()
                .add(&record.choice);
        }

        let mut rows: Vec<PartyRow> = grouped
            .into_iter()
            .map(|(party, counts)| PartyRow { party, counts })
            .collect();
        // Stable sort keeps the BTreeMap's alphabetical order for ties.
        rows.sort_by(|a, b| b.counts.sim.cmp(&a.counts.sim));

        Self { rows }
    }

    pub fn rows(&self) -> &[PartyRow] {
        &self.rows
    }

    pub fn get(&self, party: &str) -> Option<&ChoiceCounts> {
        self.rows
            .iter()
            .find(|row| row.party == party)
            .map(|row| &row.counts)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Display for PartyTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let party_width = self
            .rows
            .iter()
            .map(|row| row.party.chars().count())
            .max()
            .unwrap_or(0)
            .max("Partido".len());

        write!(f, "{:<width$}", "Partido", width = party_width)?;
        for label in VOTE_CHOICES {
            write!(f, "  {:>9}", label)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:<width$}", row.party, width = party_width)?;
            for (_, count) in row.counts.rows() {
                write!(f, "  {:>9}", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Case-insensitive party membership, for coalition and single-party
/// scoreboards. Labels are uppercased on both sides because the source
/// data's party casing is inconsistent.
#[derive(Debug, Clone)]
pub struct PartySet {
    parties: HashSet<String>,
}

impl PartySet {
    pub fn new<I, S>(parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            parties: parties
                .into_iter()
                .map(|p| p.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    pub fn contains(&self, party: &str) -> bool {
        self.parties.contains(&party.trim().to_uppercase())
    }
}

/// Flat tally of the records whose party satisfies `predicate`. An empty
/// match set yields four zero counts, never an error.
pub fn scoreboard<F>(records: &[VoteRecord], predicate: F) -> ChoiceCounts
where
    F: Fn(&str) -> bool,
{
    let mut counts = ChoiceCounts::default();
    for record in records.iter().filter(|r| predicate(&r.party)) {
        counts.add(&record.choice);
    }
    counts
}
