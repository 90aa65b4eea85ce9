//! Tests for roster parsing and providers.

use gridle::{JsonFileRoster, RosterProvider, StaticRoster, parse_roster};
use tempfile::TempDir;

const HAMILTON: &str = r#"{"name":"Lewis Hamilton","flag":"gb","teams":["McLaren","Mercedes","Ferrari"],"carNumber":44,"age":40,"firstYear":2007,"wins":105}"#;
const VERSTAPPEN: &str = r#"{"name":"Max Verstappen","flag":"nl","teams":["Toro Rosso","Red Bull"],"carNumber":1,"age":27,"firstYear":2015,"wins":63}"#;

fn write_roster(content: &str) -> (TempDir, JsonFileRoster) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("drivers.json");
    std::fs::write(&path, content).expect("Failed to write roster");
    let provider = JsonFileRoster::new(&path);
    (dir, provider)
}

#[test]
fn test_parse_array_keeps_order() {
    let roster = parse_roster(&format!("[{},{}]", HAMILTON, VERSTAPPEN)).expect("Parse failed");
    assert_eq!(roster.names(), vec!["Lewis Hamilton", "Max Verstappen"]);
    assert_eq!(roster.drivers()[0].current_team(), Some("Ferrari"));
    assert_eq!(*roster.drivers()[1].car_number(), 1);
}

#[test]
fn test_parse_index_keyed_object_orders_by_index() {
    let content = format!(r#"{{"1":{},"0":{}}}"#, HAMILTON, VERSTAPPEN);
    let roster = parse_roster(&content).expect("Parse failed");
    assert_eq!(roster.names(), vec!["Max Verstappen", "Lewis Hamilton"]);
}

#[test]
fn test_parse_orders_keys_numerically() {
    let drivers: Vec<String> = (0..11)
        .map(|i| HAMILTON.replace("Lewis Hamilton", &format!("Driver {}", i)))
        .collect();
    let body = drivers
        .iter()
        .enumerate()
        .rev()
        .map(|(i, d)| format!(r#""{}":{}"#, i, d))
        .collect::<Vec<_>>()
        .join(",");

    let roster = parse_roster(&format!("{{{}}}", body)).expect("Parse failed");
    assert_eq!(roster.len(), 11);
    assert_eq!(roster.names()[2], "Driver 2");
    assert_eq!(roster.names()[10], "Driver 10");
}

#[test]
fn test_parse_rejects_non_index_keys() {
    let content = format!(r#"{{"first":{}}}"#, HAMILTON);
    assert!(parse_roster(&content).is_err());
}

#[test]
fn test_parse_rejects_driver_without_team() {
    let teamless = HAMILTON.replace(r#"["McLaren","Mercedes","Ferrari"]"#, "[]");
    let err = parse_roster(&format!("[{}]", teamless)).expect_err("Teamless driver accepted");
    assert!(err.message.contains("Lewis Hamilton"));
}

#[test]
fn test_parse_rejects_missing_fields() {
    assert!(parse_roster(r#"[{"name":"Lewis Hamilton"}]"#).is_err());
}

#[test]
fn test_parse_rejects_scalars() {
    assert!(parse_roster("42").is_err());
    assert!(parse_roster("not json").is_err());
}

#[test]
fn test_parse_accepts_empty_array() {
    let roster = parse_roster("[]").expect("Parse failed");
    assert!(roster.is_empty());
}

#[tokio::test]
async fn test_json_file_provider_reads_file() {
    let (_dir, provider) = write_roster(&format!("[{}]", VERSTAPPEN));
    let roster = provider.roster().await.expect("Roster failed");
    assert_eq!(roster.names(), vec!["Max Verstappen"]);
}

#[tokio::test]
async fn test_json_file_provider_sees_updates() {
    let (_dir, provider) = write_roster(&format!("[{}]", VERSTAPPEN));
    assert_eq!(provider.roster().await.expect("Roster failed").len(), 1);

    std::fs::write(provider.path(), format!("[{},{}]", HAMILTON, VERSTAPPEN))
        .expect("Failed to rewrite roster");
    assert_eq!(provider.roster().await.expect("Roster failed").len(), 2);
}

#[tokio::test]
async fn test_json_file_provider_missing_file_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let provider = JsonFileRoster::new(dir.path().join("absent.json"));
    assert!(provider.roster().await.is_err());
}

#[tokio::test]
async fn test_static_provider_returns_snapshot() {
    let roster = parse_roster(&format!("[{}]", HAMILTON)).expect("Parse failed");
    let provider = StaticRoster::new(roster.clone());
    assert_eq!(provider.roster().await.expect("Roster failed"), roster);
}

#[test]
fn test_parse_ignores_upstream_extra_keys() {
    let upstream = VERSTAPPEN.replace(
        r#""name":"Max Verstappen""#,
        r#""driverId":"max_verstappen","nationality":"Dutch","dateOfBirth":"1997-09-30","lastYear":2025,"name":"Max Verstappen""#,
    );
    let roster = parse_roster(&format!("[{}]", upstream)).expect("Parse failed");
    assert_eq!(*roster.drivers()[0].age(), 27);
}
