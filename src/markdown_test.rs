use super::*;

#[test]
fn test_render_full_term() {
    let mut term = Term::new(1, "charge point");
    term.tags = Some("hardware".to_string());
    term.alternative_words = vec!["EVSE".to_string(), "charging post".to_string()];
    term.description = "Where a vehicle charges".to_string();
    term.translations.insert("sv".to_string(), "laddpunkt".to_string());
    term.translations.insert("da".to_string(), "ladepunkt".to_string());

    let expected = "## charge point\n\
                    **Tag:** hardware\n\
                    \n\
                    **Alternative words:** EVSE, charging post\n\
                    \n\
                    **Description:** Where a vehicle charges\n\
                    \n\
                    **Translations:**\n\
                    - DA: ladepunkt\n\
                    - SV: laddpunkt\n\
                    \n\
                    ---\n";
    assert_eq!(render_term(&term), expected);
}

#[test]
fn test_render_minimal_term_omits_optional_sections() {
    let mut term = Term::new(2, "kWh");
    term.tags = Some("  ".to_string());

    let rendered = render_term(&term);

    assert_eq!(rendered, "## kWh\n**Description:** \n\n---\n");
    assert!(!rendered.contains("**Tag:**"));
    assert!(!rendered.contains("**Translations:**"));
}

#[test]
fn test_render_document_keeps_term_order() {
    let terms = vec![Term::new(1, "Zeta"), Term::new(2, "Alpha")];

    let document = render_markdown(&terms);

    assert!(document.starts_with("# Glossary\n\n"));
    let zeta = document.find("## Zeta").unwrap();
    let alpha = document.find("## Alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_render_empty_glossary() {
    let document = render_markdown(&[]);
    assert!(document.starts_with("# Glossary"));
    assert!(!document.contains("##"));
}
