mod common;

use anyhow::Result;
use covid_map_etl::config::toml_config::BatchConfig;
use covid_map_etl::core::batch::run_batch;
use covid_map_etl::{
    CliConfig, Dataset, DatasetKind, DatasetPipeline, EtlEngine, EtlError, LocalStorage,
    ValidationReason,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn cli_config(kind: DatasetKind, source: String, output_path: &str) -> CliConfig {
    CliConfig {
        kind,
        source,
        name: None,
        output_path: output_path.to_string(),
        compress: false,
        verbose: false,
        log_json: false,
    }
}

#[tokio::test]
async fn hospitals_from_http_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/rs.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(common::hospitals());
    });

    let config = cli_config(DatasetKind::Hospital, server.url("/rs.json"), &output_path);
    let engine = EtlEngine::new(DatasetPipeline::new(LocalStorage::current_dir(), config));
    let outcome = engine.run().await?;

    api_mock.assert();
    assert!(outcome.output_path.ends_with("hospitals.json"));
    assert_eq!(outcome.summary.record_count, 3);
    assert_eq!(outcome.summary.per_province.get("BALI"), Some(&2));

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(temp_dir.path().join("hospitals.json"))?)?;
    assert_eq!(written, common::hospitals());

    let csv = std::fs::read_to_string(temp_dir.path().join("hospitals.csv"))?;
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("RSUD Dr. Soetomo"));

    assert!(temp_dir.path().join("hospitals.summary.json").exists());
    Ok(())
}

#[tokio::test]
async fn covid_from_local_file_compressed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("covid.json");
    std::fs::write(&source, serde_json::to_vec(&common::covid_snapshot())?)?;
    let output_path = temp_dir.path().join("out");

    let mut config = cli_config(
        DatasetKind::Covid,
        source.to_str().unwrap().to_string(),
        output_path.to_str().unwrap(),
    );
    config.compress = true;
    config.name = Some("kasus".to_string());

    let engine = EtlEngine::new(DatasetPipeline::new(LocalStorage::current_dir(), config));
    let outcome = engine.run().await?;

    assert!(outcome.output_path.ends_with("kasus.zip"));
    let totals = outcome.summary.case_totals.unwrap();
    assert_eq!(totals.cases, 19100);

    let zip_data = std::fs::read(output_path.join("kasus.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    let mut json = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("kasus.json")?, &mut json)?;
    let written: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(written["list_data"][0]["kelompok_umur"][5]["key"], "≥ 60");
    Ok(())
}

#[tokio::test]
async fn invalid_geometry_aborts_without_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut geo = common::geo_document();
    geo["features"][0]["geometry"]["type"] = serde_json::json!("Polygon");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/prov.geojson");
        then.status(200).json_body(geo);
    });

    let config = cli_config(DatasetKind::Geo, server.url("/prov.geojson"), &output_path);
    let engine = EtlEngine::new(DatasetPipeline::new(LocalStorage::current_dir(), config));

    match engine.run().await {
        Err(EtlError::SchemaError(e)) => {
            assert_eq!(e.reason, ValidationReason::WrongTagConstant);
            assert_eq!(e.path, "$.features[0].geometry.type");
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(outcome) => panic!("expected failure, wrote {}", outcome.output_path),
    }

    assert!(!temp_dir.path().join("provinces.json").exists());
    Ok(())
}

#[tokio::test]
async fn batch_runs_all_datasets_and_reconciles() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    let mut geo = common::geo_document();
    // Jawa Timur claims two labs; the lab feed lists none with that province.
    geo["features"][1]["properties"]["lab_count"] = serde_json::json!(2);

    let server = MockServer::start();
    for (path, body) in [
        ("/rs.json", common::hospitals()),
        ("/lab.json", common::labs()),
        ("/prov.geojson", geo),
        ("/covid.json", common::covid_snapshot()),
    ] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).json_body(body);
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/missing.json");
        then.status(404);
    });

    let content = format!(
        r#"
[batch]
name = "dashboard"

[load]
output_path = "{out}"

[reconcile]
enabled = true

[[datasets]]
name = "hospitals"
kind = "hospital"
source = "{base}/rs.json"

[[datasets]]
name = "labs"
kind = "lab"
source = "{base}/lab.json"

[[datasets]]
name = "provinces"
kind = "geo"
source = "{base}/prov.geojson"

[[datasets]]
name = "covid"
kind = "covid"
source = "{base}/covid.json"

[[datasets]]
name = "archive"
kind = "covid"
source = "{base}/missing.json"
"#,
        out = output_path,
        base = server.base_url()
    );
    let config = BatchConfig::from_toml_str(&content)?;

    let report = run_batch(&config, LocalStorage::current_dir()).await?;

    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "archive");
    assert!(matches!(
        report.failures[0].1,
        EtlError::HttpStatusError { status: 404, .. }
    ));
    assert_eq!(report.worst_severity().map(|s| s.exit_code()), Some(0));

    assert!(report
        .outcomes
        .iter()
        .any(|o| matches!(o.dataset, Dataset::Geo(_))));

    let mismatches = report.mismatches.unwrap();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].province, "Jawa Timur");
    assert_eq!(mismatches[0].declared_labs, 2);
    assert_eq!(mismatches[0].counted_labs, 0);

    let csv = std::fs::read_to_string(temp_dir.path().join("reconcile.csv"))?;
    assert!(csv.starts_with("province,declared_hospitals"));
    assert!(csv.contains("Jawa Timur"));
    Ok(())
}
