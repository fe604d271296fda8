use std::sync::LazyLock;

use crate::types::{NOT_AVAILABLE, VoteRecord, VoteResult};

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Voting list not found — check that the URL points at a voting results page")]
    NoVotingList,
}

// Trailing "-votou <choice>" marker. Entries without it belong to
// legislators who were absent.
static RE_VOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-votou\s+(.+)").expect("invalid regex: vote marker"));

// "Name (PARTY-UF)", where UF is a two-letter federative-unit code.
// Deliberately unanchored at the end: some entries carry trailing text
// after the parenthetical (e.g. "- Presente").
static RE_NAME_PARTY_UF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*\((.*?)-([A-Z]{2})\)").expect("invalid regex: name/party/UF")
});

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a voting page into its official result text and roll-call records.
///
/// The result text is optional (primary selector, then the page `h1`,
/// then nothing); the roll-call list is not — a page without it fails
/// with [`ParseError::NoVotingList`].
pub fn parse_vote_page(html: &str) -> Result<VoteResult, ParseError> {
    let document = Html::parse_document(html);

    let result_selector = Selector::parse(".resultadoVotacao").unwrap();
    let h1_selector = Selector::parse("h1").unwrap();
    let official_result = document
        .select(&result_selector)
        .next()
        .or_else(|| document.select(&h1_selector).next())
        .map(|e| normalize_whitespace(&elem_text(e)))
        .filter(|t| !t.is_empty());

    let item_selector = Selector::parse("#accordion li").unwrap();
    let records: Vec<VoteRecord> = document
        .select(&item_selector)
        // Join text nodes with a space so adjacent markup never merges words.
        .map(|li| extract_record(&normalize_whitespace(&li.text().collect::<Vec<_>>().join(" "))))
        .collect();

    if records.is_empty() {
        return Err(ParseError::NoVotingList);
    }

    log::debug!("Parsed {} vote records", records.len());

    Ok(VoteResult {
        official_result,
        records,
    })
}

/// Turns one roll-call list entry into a [`VoteRecord`]. Pure and total:
/// irregular entries degrade to "N/A" fields instead of failing.
pub fn extract_record(fragment: &str) -> VoteRecord {
    let mut choice = String::from("Ausente");
    let mut text = fragment.trim().to_string();
    if let Some(caps) = RE_VOTE_MARKER.captures(fragment) {
        // A capture that collapses to the empty string stays empty; the
        // "Ausente" default applies only when the marker itself is missing.
        choice = normalize_whitespace(&caps[1]);
        text = fragment.replacen(&caps[0], "", 1).trim().to_string();
    }

    match RE_NAME_PARTY_UF.captures(&text) {
        Some(caps) => VoteRecord {
            name: normalize_whitespace(&caps[1]),
            party: normalize_whitespace(&caps[2]),
            region: caps[3].to_string(),
            choice,
        },
        None => VoteRecord {
            name: normalize_whitespace(&text),
            party: NOT_AVAILABLE.to_string(),
            region: NOT_AVAILABLE.to_string(),
            choice,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_well_formed_fragment() {
        let record = extract_record("João Silva (PT-SP) - Presente -votou Sim");

        assert_eq!(record.name, "João Silva");
        assert_eq!(record.party, "PT");
        assert_eq!(record.region, "SP");
        assert_eq!(record.choice, "Sim");
    }

    #[test]
    fn test_extract_ignores_extra_internal_whitespace() {
        let record = extract_record("  João   Silva   (PT-SP)   -votou   Sim  ");

        assert_eq!(record.name, "João Silva");
        assert_eq!(record.party, "PT");
        assert_eq!(record.region, "SP");
        assert_eq!(record.choice, "Sim");
    }

    #[test]
    fn test_extract_missing_marker_defaults_to_ausente() {
        let record = extract_record("Maria Souza (MDB-RJ)");

        assert_eq!(record.name, "Maria Souza");
        assert_eq!(record.party, "MDB");
        assert_eq!(record.region, "RJ");
        assert_eq!(record.choice, "Ausente");
    }

    #[test]
    fn test_extract_missing_parenthetical_degrades_to_sentinels() {
        let record = extract_record("Mesa Diretora -votou Abstenção");

        assert_eq!(record.name, "Mesa Diretora");
        assert_eq!(record.party, "N/A");
        assert_eq!(record.region, "N/A");
        assert_eq!(record.choice, "Abstenção");
    }

    #[test]
    fn test_extract_irregular_fragment_keeps_full_text_as_name() {
        let record = extract_record("Deputado sem partido registrado");

        assert_eq!(record.name, "Deputado sem partido registrado");
        assert_eq!(record.party, "N/A");
        assert_eq!(record.region, "N/A");
        assert_eq!(record.choice, "Ausente");
    }

    #[test]
    fn test_extract_lowercase_uf_does_not_match() {
        // UF must be exactly two uppercase letters.
        let record = extract_record("Ana Lima (PSD-sp) -votou Não");

        assert_eq!(record.name, "Ana Lima (PSD-sp)");
        assert_eq!(record.party, "N/A");
        assert_eq!(record.region, "N/A");
        assert_eq!(record.choice, "Não");
    }

    #[test]
    fn test_extract_empty_choice_capture_stays_empty() {
        // "-votou" followed by spaces only: the capture trims to "",
        // which is kept as-is rather than treated as an absence.
        let record = extract_record("Carlos Souto (PL-BA) -votou  ");

        assert_eq!(record.name, "Carlos Souto");
        assert_eq!(record.party, "PL");
        assert_eq!(record.region, "BA");
        assert_eq!(record.choice, "");
    }

    #[test]
    fn test_extract_multiword_choice() {
        let record = extract_record("Rita Campos (PSB-PE) -votou Obstrução declarada");

        assert_eq!(record.choice, "Obstrução declarada");
        assert_eq!(record.party, "PSB");
    }

    #[test]
    fn test_parse_vote_page_with_result_box() {
        let html = r#"
            <html><body>
                <div class="resultadoVotacao">
                    Aprovado o Projeto de Lei
                </div>
                <ul id="accordion">
                    <li>João Silva (PT-SP) -votou Sim</li>
                    <li>Maria Souza (Republican-RJ) -votou Não</li>
                    <li>Pedro Alves (MDB-MG)</li>
                </ul>
            </body></html>
        "#;

        let result = parse_vote_page(html).expect("Failed to parse vote page");

        assert_eq!(
            result.official_result.as_deref(),
            Some("Aprovado o Projeto de Lei")
        );
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.records[0].name, "João Silva");
        assert_eq!(result.records[1].party, "Republican");
        assert_eq!(result.records[2].choice, "Ausente");
    }

    #[test]
    fn test_parse_vote_page_falls_back_to_h1() {
        let html = r#"
            <html><body>
                <h1>Votação nominal 123</h1>
                <ul id="accordion">
                    <li>João Silva (PT-SP) -votou Sim</li>
                </ul>
            </body></html>
        "#;

        let result = parse_vote_page(html).expect("Failed to parse vote page");

        assert_eq!(result.official_result.as_deref(), Some("Votação nominal 123"));
    }

    #[test]
    fn test_parse_vote_page_without_result_text() {
        let html = r#"
            <html><body>
                <ul id="accordion">
                    <li>João Silva (PT-SP) -votou Sim</li>
                </ul>
            </body></html>
        "#;

        let result = parse_vote_page(html).expect("Failed to parse vote page");

        assert_eq!(result.official_result, None);
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_parse_vote_page_preserves_source_order() {
        let html = r#"
            <ul id="accordion">
                <li>Primeiro Nome (PT-SP) -votou Sim</li>
                <li>Segundo Nome (PL-RJ) -votou Não</li>
                <li>Terceiro Nome (MDB-MG) -votou Sim</li>
            </ul>
        "#;

        let result = parse_vote_page(html).expect("Failed to parse vote page");

        let names: Vec<&str> = result.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Primeiro Nome", "Segundo Nome", "Terceiro Nome"]);
    }

    #[test]
    fn test_parse_vote_page_missing_list_fails() {
        let html = "<html><body><h1>Página qualquer</h1></body></html>";

        let err = parse_vote_page(html).expect_err("Should fail without a voting list");
        assert!(matches!(err, ParseError::NoVotingList));
    }

    #[test]
    fn test_parse_vote_page_empty_list_fails() {
        let html = r#"<div class="resultadoVotacao">Aprovado</div><ul id="accordion"></ul>"#;

        let err = parse_vote_page(html).expect_err("Should fail with an empty voting list");
        assert!(matches!(err, ParseError::NoVotingList));
    }

    #[test]
    fn test_list_item_text_is_whitespace_normalized() {
        let html = r#"
            <ul id="accordion">
                <li>
                    João
                    Silva
                    <span>(PT-SP)</span>
                    -votou
                    Sim
                </li>
            </ul>
        "#;

        let result = parse_vote_page(html).expect("Failed to parse vote page");

        assert_eq!(result.records[0].name, "João Silva");
        assert_eq!(result.records[0].choice, "Sim");
    }
}
