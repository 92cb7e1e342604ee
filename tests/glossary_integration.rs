// End-to-end checks that every backend serves the same glossary to the facade.

use std::sync::Arc;

use glossary::{
    BundledRepository, Glossary, GlossaryConfig, RemoteRepository, SourceKind, SqliteRepository,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT_BODY: &str = r#"{
  "terms": [
    {
      "id": 1,
      "term": "State of Charge",
      "description": "Battery fill level",
      "caseSensitive": false,
      "tags": "battery",
      "translations": [{"languageCode": "de", "translation": "Ladezustand"}],
      "alternatives": [{"alternative": "SoC", "isPlural": false}]
    },
    {
      "id": 2,
      "term": "charge point",
      "description": "Where a vehicle charges",
      "tags": "hardware",
      "alternatives": [
        {"alternative": "charging station", "isPlural": false},
        {"alternative": "EVSE", "isPlural": false}
      ]
    },
    {
      "id": 3,
      "term": "kWh",
      "caseSensitive": true,
      "tags": "units",
      "alternatives": [{"alternative": "kwh", "isPlural": false}]
    },
    {
      "id": 4,
      "term": "OCPP",
      "tags": "protocols",
      "alternatives": [{"alternative": "ocpp", "isPlural": false}]
    }
  ]
}"#;

const INPUT: &str = "The SoC of the EVSE reached 40 kwh over ocpp at the charging station.";
const EXPECTED: &str =
    "The State of Charge of the charge point reached 40 kWh over OCPP at the charge point.";

async fn assert_glossary_behaviour(glossary: &Glossary) {
    assert_eq!(glossary.count().await.unwrap(), 4);
    assert_eq!(glossary.normalize_text(INPUT).await.unwrap(), EXPECTED);
    assert_eq!(glossary.normalize_text(EXPECTED).await.unwrap(), EXPECTED);
    assert_eq!(
        glossary.translate("State of Charge", "de").await.unwrap(),
        Some("Ladezustand".to_string())
    );
    assert_eq!(glossary.get_by_tag("units").await.unwrap()[0].term, "kWh");
    assert_eq!(glossary.languages().await.unwrap(), vec!["de".to_string()]);
}

#[tokio::test]
async fn test_bundled_backend_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("glossary.json");
    std::fs::write(&bundle, ENDPOINT_BODY).unwrap();

    let config = GlossaryConfig {
        source: SourceKind::Bundled,
        bundle_path: Some(bundle),
        ..GlossaryConfig::default()
    };
    let glossary = Glossary::from_config(&config).await.unwrap();

    assert_glossary_behaviour(&glossary).await;
}

#[tokio::test]
async fn test_sqlite_backend_matches_bundle() {
    let temp_dir = TempDir::new().unwrap();
    let bundled = BundledRepository::from_json(ENDPOINT_BODY).unwrap();

    let repository = SqliteRepository::create(&temp_dir.path().join("glossary.sqlite"))
        .await
        .unwrap();
    repository
        .import_terms(bundled.snapshot().terms())
        .await
        .unwrap();

    assert_glossary_behaviour(&Glossary::new(Arc::new(repository))).await;
}

#[tokio::test]
async fn test_remote_backend_matches_bundle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/api/glossary"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ENDPOINT_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let repository =
        RemoteRepository::new(format!("{}/public/api/glossary", server.uri()), None).unwrap();

    assert_glossary_behaviour(&Glossary::new(Arc::new(repository))).await;
}
