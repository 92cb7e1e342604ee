// Commands that resolve config read GLOSSARY_* variables, so they run serially
// with the environment tests.

use super::*;
use crate::term::Term;
use serial_test::serial;
use tempfile::TempDir;

fn write_bundle(dir: &TempDir) -> PathBuf {
    let mut soc = Term::new(1, "State of Charge");
    soc.description = "Battery level".to_string();
    soc.alternative_words = vec!["SoC".to_string()];
    soc.translations.insert("de".to_string(), "Ladezustand".to_string());

    let mut kwh = Term::new(2, "kWh");
    kwh.tags = Some("units".to_string());

    let path = dir.path().join("bundle.json");
    std::fs::write(&path, serde_json::to_string(&vec![soc, kwh]).unwrap()).unwrap();
    path
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("glossary").chain(args.iter().copied()))
        .expect("arguments should parse")
}

async fn run_bundled(dir: &TempDir, args: &[&str]) -> Result<String, GlossaryError> {
    let bundle = write_bundle(dir);
    let bundle = bundle.to_str().unwrap();
    let mut full = vec!["--source", "bundled", "--bundle", bundle];
    full.extend_from_slice(args);
    run(parse(&full)).await
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = parse(&["count", "--source", "sqlite", "--db", "/tmp/g.sqlite"]);

    assert_eq!(cli.source, Some(SourceKind::Sqlite));
    assert_eq!(cli.db, Some(PathBuf::from("/tmp/g.sqlite")));
    assert!(matches!(cli.command, Command::Query(QueryCommand::Count)));
}

#[test]
fn test_parse_rejects_unknown_source() {
    let result = Cli::try_parse_from(["glossary", "--source", "ftp", "list"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_normalize_without_text() {
    let cli = parse(&["normalize"]);
    assert!(matches!(
        cli.command,
        Command::Query(QueryCommand::Normalize { text: None })
    ));
}

#[test]
fn test_parse_import_is_not_a_query() {
    let cli = parse(&["import", "bundle.json"]);
    assert!(
        matches!(cli.command, Command::Import { ref bundle } if bundle == Path::new("bundle.json"))
    );
}

#[tokio::test]
async fn test_execute_query_against_glossary() {
    let glossary = Glossary::new(std::sync::Arc::new(BundledRepository::from_terms(vec![
        Term::new(1, "kWh"),
    ])));

    assert_eq!(execute(&glossary, QueryCommand::Count).await.unwrap(), "1");
    assert_eq!(
        execute(&glossary, QueryCommand::Normalize { text: Some("5 kwh".to_string()) })
            .await
            .unwrap(),
        "5 kWh"
    );
}

#[test]
#[serial]
fn test_flags_override_config() {
    let cli = parse(&["--source", "remote", "--url", "http://localhost:1/glossary", "list"]);
    let config = cli.resolve_config().unwrap();

    assert_eq!(config.source, SourceKind::Remote);
    assert_eq!(config.api_url, "http://localhost:1/glossary");
}

#[test]
fn test_strip_line_ending() {
    assert_eq!(strip_line_ending("SoC\n".to_string()), "SoC");
    assert_eq!(strip_line_ending("SoC\r\n".to_string()), "SoC");
    assert_eq!(strip_line_ending("SoC\n\n".to_string()), "SoC\n");
    assert_eq!(strip_line_ending("SoC".to_string()), "SoC");
}

#[tokio::test]
#[serial]
async fn test_count_and_normalize() {
    let dir = TempDir::new().unwrap();

    assert_eq!(run_bundled(&dir, &["count"]).await.unwrap(), "2");
    assert_eq!(
        run_bundled(&dir, &["normalize", "SoC is 80%"]).await.unwrap(),
        "State of Charge is 80%"
    );
}

#[tokio::test]
#[serial]
async fn test_json_outputs() {
    let dir = TempDir::new().unwrap();

    let listed: Vec<Term> =
        serde_json::from_str(&run_bundled(&dir, &["list"]).await.unwrap()).unwrap();
    assert_eq!(listed.len(), 2);

    let found: Option<Term> =
        serde_json::from_str(&run_bundled(&dir, &["get", "kWh"]).await.unwrap()).unwrap();
    assert_eq!(found.unwrap().id, 2);

    assert_eq!(run_bundled(&dir, &["get", "nope"]).await.unwrap(), "null");

    let languages: Vec<String> =
        serde_json::from_str(&run_bundled(&dir, &["languages"]).await.unwrap()).unwrap();
    assert_eq!(languages, vec!["de"]);
}

#[tokio::test]
#[serial]
async fn test_translate_missing_prints_nothing() {
    let dir = TempDir::new().unwrap();

    assert_eq!(
        run_bundled(&dir, &["translate", "State of Charge", "de"]).await.unwrap(),
        "Ladezustand"
    );
    assert_eq!(run_bundled(&dir, &["translate", "kWh", "de"]).await.unwrap(), "");
}

#[tokio::test]
#[serial]
async fn test_export_markdown_to_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("glossary.md");

    let message = run_bundled(&dir, &["export-markdown", "--output", output.to_str().unwrap()])
        .await
        .unwrap();

    assert!(message.starts_with("Wrote 2 terms"));
    let document = std::fs::read_to_string(&output).unwrap();
    assert!(document.contains("## State of Charge"));
    assert!(document.contains("- DE: Ladezustand"));
}

#[tokio::test]
#[serial]
async fn test_import_then_query_sqlite() {
    let dir = TempDir::new().unwrap();
    let bundle = write_bundle(&dir);
    let db = dir.path().join("nested").join("glossary.sqlite");
    let db = db.to_str().unwrap();

    let message = run(parse(&["--db", db, "import", bundle.to_str().unwrap()]))
        .await
        .unwrap();
    assert!(message.starts_with("Imported 2 terms"));

    let count = run(parse(&["--source", "sqlite", "--db", db, "count"])).await.unwrap();
    assert_eq!(count, "2");
}

#[tokio::test]
#[serial]
async fn test_missing_bundle_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    let result = run(parse(&[
        "--source",
        "bundled",
        "--bundle",
        missing.to_str().unwrap(),
        "list",
    ]))
    .await;

    assert!(matches!(result, Err(GlossaryError::Repository(_))));
}
