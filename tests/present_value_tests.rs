use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

const HISTORY: &str = r#"
- code: P-1
  project_name: Ruta 45
  scope: Nuevo
  length_km: 2.0
  cost_millions: 9.0
  start_year: 2024
- code: P-2
  project_name: Transversal
  scope: Mejoramiento
  length_km: 6.0
  cost_millions: 17.0
  start_year: 2024
- code: P-3
  project_name: Variante
  length_km: 10.0
  cost_millions: "25"
  start_year: 2024
- code: P-4
  project_name: Sin datos
  length_km: n/a
  cost_millions: 4.0
  start_year: 2020
"#;

#[tokio::test]
async fn present_value_writes_projection_and_plot() {
    let temp = assert_fs::TempDir::new().unwrap();
    let history = temp.child("history.yaml");
    history.write_str(HISTORY).unwrap();
    let rates = temp.child("rates.yaml");
    rates.write_str("annual_increments:\n  2025: 100.0\n").unwrap();
    let output = temp.child("trend.yaml");
    let plot = temp.child("trend.png");

    let mut cmd = assert_cmd::cargo_bin_cmd!("roadcost");
    cmd.args([
        "present-value",
        "-i",
        history.path().to_str().unwrap(),
        "-r",
        rates.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
        "-y",
        "2025",
        "--plot",
        plot.path().to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Projects: 3"))
        .stdout(predicate::str::contains("Skipped: 1"))
        .stdout(predicate::str::contains("Sin especificar | 1"))
        .stdout(predicate::str::contains("Trend chart written to"));

    let projection: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(output.path()).unwrap()).unwrap();
    // A 100% increment doubles every 2024 cost.
    assert_eq!(
        projection["points"][0]["cost_at_present_year"].as_f64(),
        Some(18.0)
    );
    let slope = projection["trend_line"]["slope"].as_f64().unwrap();
    assert!((slope - 4.0).abs() < 1e-9);

    let metadata = fs::metadata(plot.path()).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn present_value_requires_a_rate() {
    let temp = assert_fs::TempDir::new().unwrap();
    let history = temp.child("history.yaml");
    history.write_str(HISTORY).unwrap();
    let rates = temp.child("rates.yaml");
    rates.write_str("{}\n").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("roadcost");
    cmd.args([
        "present-value",
        "-i",
        history.path().to_str().unwrap(),
        "-r",
        rates.path().to_str().unwrap(),
        "-o",
        temp.child("trend.yaml").path().to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("MissingRate"));
}
