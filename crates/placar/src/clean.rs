use std::collections::HashMap;

use crate::types::VoteRecord;

/// Canonical spellings for party labels the portal is known to
/// mis-render. Passed explicitly so tests can substitute their own table.
#[derive(Debug, Clone)]
pub struct PartyAliases {
    table: HashMap<String, String>,
}

impl Default for PartyAliases {
    fn default() -> Self {
        Self::new([
            ("Republican", "Republicanos"),
            ("Solidaried", "Solidariedade"),
        ])
    }
}

impl PartyAliases {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trims the label and substitutes the canonical spelling if the
    /// trimmed value is in the table; anything else passes through.
    pub fn resolve<'a>(&'a self, party: &'a str) -> &'a str {
        let party = party.trim();
        self.table.get(party).map(String::as_str).unwrap_or(party)
    }
}

/// Canonicalizes every record's party label. Pure and idempotent.
pub fn normalize_parties(records: Vec<VoteRecord>, aliases: &PartyAliases) -> Vec<VoteRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.party = aliases.resolve(&record.party).to_string();
            record
        })
        .collect()
}
