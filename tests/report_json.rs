use websentinel::{analyze, ResponseHeaders, SecurityReport};

#[test]
fn report_serializes_with_stable_keys() {
    let headers: ResponseHeaders = [
        ("Strict-Transport-Security", "max-age=3600"),
        ("X-Frame-Options", "DENY"),
    ]
    .into_iter()
    .collect();
    let report = analyze("https://json.example/", &headers);
    let value = serde_json::to_value(&report).expect("serialize report");

    for key in [
        "url",
        "totalScore",
        "maxTotalScore",
        "riskLevel",
        "riskLabel",
        "riskDescription",
        "headers",
        "timestamp",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }

    let families = value["headers"].as_object().expect("headers is an object");
    let names: Vec<&str> = families.keys().map(String::as_str).collect();
    assert_eq!(names.len(), 7);
    for name in [
        "Content-Security-Policy",
        "Strict-Transport-Security",
        "X-Frame-Options",
        "X-Content-Type-Options",
        "Referrer-Policy",
        "Permissions-Policy",
        "Cross-Origin-Isolation",
    ] {
        assert!(names.contains(&name), "missing family {name}");
    }

    let hsts = &value["headers"]["Strict-Transport-Security"];
    assert_eq!(hsts["status"], "weak");
    assert_eq!(hsts["value"], "max-age=3600");
    assert_eq!(hsts["score"], 2);
    assert_eq!(hsts["maxScore"], 6);
    assert!(value["headers"]["Permissions-Policy"]["value"].is_null());
    assert_eq!(value["riskLevel"], "High");
    assert_eq!(value["maxTotalScore"], 20);
}

#[test]
fn report_reads_back_from_json() {
    let report = analyze("https://json.example/", &ResponseHeaders::new());
    let json = serde_json::to_string(&report).unwrap();
    let parsed: SecurityReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}
