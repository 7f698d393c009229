use websentinel::core::export::{export_file_name, export_report};
use websentinel::core::history::{HistoryStore, JsonFileHistory, HISTORY_LIMIT};
use websentinel::{analyze, ResponseHeaders, SecurityReport};

fn report(url: &str, pairs: &[(&str, &str)]) -> SecurityReport {
    let headers: ResponseHeaders = pairs.iter().copied().collect();
    analyze(url, &headers)
}

#[test]
fn missing_file_is_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileHistory::new(dir.path().join("nested").join("scan_history.json"));
    assert!(store.load().is_empty());
}

#[test]
fn rescanning_a_url_keeps_only_the_latest() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileHistory::new(dir.path().join("scan_history.json"));

    store.save(&report("https://a.example/", &[])).unwrap();
    store.save(&report("https://b.example/", &[])).unwrap();
    let latest = report("https://a.example/", &[("X-Content-Type-Options", "nosniff")]);
    store.save(&latest).unwrap();

    let history = store.load();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], latest);
    assert_eq!(history[1].url, "https://b.example/");
}

#[test]
fn history_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileHistory::new(dir.path().join("scan_history.json"));
    for i in 0..(HISTORY_LIMIT + 5) {
        store.save(&report(&format!("https://{i}.example/"), &[])).unwrap();
    }
    let history = store.load();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0].url, format!("https://{}.example/", HISTORY_LIMIT + 4));
}

#[test]
fn malformed_file_degrades_to_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan_history.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = JsonFileHistory::new(&path);

    assert!(store.load().is_empty());
    store.save(&report("https://a.example/", &[])).unwrap();
    assert_eq!(store.load().len(), 1);
}

#[test]
fn clear_removes_everything_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileHistory::new(dir.path().join("scan_history.json"));
    store.save(&report("https://a.example/", &[])).unwrap();
    store.clear().unwrap();
    store.clear().unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn export_writes_named_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let report = report("https://export.example/", &[("Permissions-Policy", "geolocation=()")]);
    let path = export_report(&report, &dir.path().join("out")).unwrap();

    assert_eq!(path.file_name().unwrap().to_str().unwrap(), export_file_name(&report));
    let written: SecurityReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, report);
}
