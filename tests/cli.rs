use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::tempdir;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn facetbar(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_facetbar"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run facetbar")
}

fn json_output(args: &[&str]) -> Value {
    let output = facetbar(args);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn modifier_click_adds_to_selection() {
    let snapshot = demo("issues.json");
    let out = json_output(&[
        snapshot.to_str().unwrap(),
        "--json",
        "-a",
        "multi:languages=py",
    ]);

    assert_eq!(out["query"]["languages"], json!(["java", "py"]));
    assert_eq!(
        out["events"],
        json!([{ "event": "changed", "field": "languages", "values": ["java", "py"] }])
    );
}

#[test]
fn plain_click_on_sole_selection_clears_it() {
    let snapshot = demo("issues.json");
    let out = json_output(&[
        snapshot.to_str().unwrap(),
        "--json",
        "-a",
        "click:languages=java",
    ]);

    assert_eq!(out["query"], json!({}));
}

#[test]
fn rendered_languages_panel_ranks_and_hints() {
    let snapshot = demo("issues.json");
    let out = json_output(&[snapshot.to_str().unwrap(), "--json"]);

    let panels = out["sidebar"]["panels"].as_array().unwrap();
    let languages = panels.iter().find(|p| p["field"] == "languages").unwrap();
    assert_eq!(languages["header_values"], json!(["Java"]));

    let entries = languages["entries"].as_array().unwrap();
    let order: Vec<&str> = entries.iter().map(|e| e["value"].as_str().unwrap()).collect();
    assert_eq!(order, vec!["java", "js", "py", "ts"]);
    assert_eq!(entries[0]["stat"], json!("1.4k"));
    assert_eq!(entries[0]["tooltip"], json!(false));
    assert_eq!(entries[1]["tooltip"], json!(true));
}

#[test]
fn config_changes_layout() {
    let snapshot = demo("issues.json");
    let config = demo("sidebar.toml");
    let out = json_output(&[
        snapshot.to_str().unwrap(),
        "--json",
        "--config",
        config.to_str().unwrap(),
        "--open-all",
    ]);

    let panels = out["sidebar"]["panels"].as_array().unwrap();
    let fields: Vec<&str> = panels.iter().map(|p| p["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["types", "languages", "tags"]);

    let tags: Vec<&str> = panels[2]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["value"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["brain-overload", "convention", "cwe", "the-ugly"]);
    assert_eq!(panels[1]["entries"][0]["stat"], json!("1,4k"));
}

#[test]
fn unknown_facet_exits_with_usage_error() {
    let snapshot = demo("issues.json");
    let output = facetbar(&[snapshot.to_str().unwrap(), "-a", "clear:colors"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown Facet"));
}

#[test]
fn duplicate_selection_fails_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dupes.json");
    fs::write(&path, r#"{ "query": { "tags": ["cwe", "cwe"] } }"#).unwrap();

    let output = facetbar(&[path.to_str().unwrap(), "--check"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate value"));
}

#[test]
fn write_saves_updated_snapshot() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("next.json");
    let snapshot = demo("issues.json");

    let output = facetbar(&[
        snapshot.to_str().unwrap(),
        "--facet",
        "severities=MAJOR",
        "-a",
        "add:tags=cwe",
        "-a",
        "toggle:tags",
        "--write",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let saved: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(
        saved["query"],
        json!({ "languages": ["java"], "severities": ["MAJOR"], "tags": ["cwe"] })
    );
    assert_eq!(saved["open_facets"]["tags"], json!(true));
    assert_eq!(saved["loading_facets"]["types"], json!(true));
}

#[test]
fn date_and_standard_filters_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dates.json");
    fs::write(
        &path,
        r#"{ "facets": { "createdAt": { "2018-01-01": 4, "2018-02-01": 2 } },
             "query": { "createdAt": ["2018-01-01"], "cwe": ["79"] } }"#,
    )
    .unwrap();

    let out = json_output(&[path.to_str().unwrap(), "--json", "-a", "click:createdAt=2018-01-01"]);
    assert_eq!(
        out["query"],
        json!({ "createdAfter": ["2018-01-01"], "createdBefore": ["2018-02-01"], "cwe": ["79"] })
    );
}

#[test]
fn missing_label_table_falls_back_to_raw_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("assignees.json");
    fs::write(
        &path,
        r#"{ "facets": { "assignees": { "alice": 3 } },
             "query": { "assignees": ["alice"] } }"#,
    )
    .unwrap();

    let out = json_output(&[path.to_str().unwrap(), "--json"]);
    let panels = out["sidebar"]["panels"].as_array().unwrap();
    let assignees = panels.iter().find(|p| p["field"] == "assignees").unwrap();
    assert_eq!(assignees["header_values"], json!(["alice"]));
}
