use crate::types::VoteRecord;

// Byte-order mark so spreadsheet software detects UTF-8.
const BOM: &str = "\u{feff}";
const HEADER: &str = "Nome,Partido,UF,Voto";

/// Renders records as CSV in source order, BOM-prefixed, with the
/// compatibility header `Nome,Partido,UF,Voto`.
pub fn to_csv(records: &[VoteRecord]) -> String {
    let mut out = String::from(BOM);
    out.push_str(HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&csv_field(&record.name));
        out.push(',');
        out.push_str(&csv_field(&record.party));
        out.push(',');
        out.push_str(&csv_field(&record.region));
        out.push(',');
        out.push_str(&csv_field(&record.choice));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
