use cse_rs::companies::{self, CompanyRecord, Universe, UniverseStatus};

fn record(symbol: &str, name: &str, id: i64) -> CompanyRecord {
    CompanyRecord {
        symbol: symbol.into(),
        name: name.into(),
        security_id: id,
        sector: None,
    }
}

#[test]
fn missing_file_is_an_empty_universe() {
    let dir = tempfile::tempdir().unwrap();
    let universe = Universe::load(dir.path().join("nope.json"));

    assert_eq!(universe.status(), &UniverseStatus::Missing);
    assert!(universe.is_empty());
}

#[test]
fn malformed_file_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ not json").unwrap();

    let universe = Universe::load(&path);

    assert!(matches!(universe.status(), UniverseStatus::Malformed(_)));
    assert_eq!(universe.len(), 0);
}

#[test]
fn saved_roster_loads_back_and_resolves_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company_data").join("data.json");
    let records = vec![
        record("LOLC.N0000", "LOLC HOLDINGS PLC", 642),
        record("CSLK.N0000", "CITRUS LEISURE PLC", 2048),
    ];

    companies::universe::save(&path, &records).unwrap();
    let universe = Universe::load(&path);

    assert_eq!(universe.status(), &UniverseStatus::Loaded);
    assert_eq!(universe.records(), records.as_slice());
    assert_eq!(universe.find_security_id("citrus"), Some(2048));
    assert_eq!(universe.find_security_id("lolc"), Some(642));
    assert_eq!(universe.by_symbol("cslk.n0000").map(|c| c.security_id), Some(2048));
    assert_eq!(universe.by_security_id(642).map(|c| c.name.as_str()), Some("LOLC HOLDINGS PLC"));
    assert_eq!(universe.find_security_id("   "), None);
}

#[test]
fn roster_file_uses_camel_case_security_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"[{"symbol":"TAP.N0000","name":"TAPROBANE HOLDINGS PLC","securityId":9}]"#,
    )
    .unwrap();

    let universe = Universe::load(&path);

    assert_eq!(universe.records()[0].security_id, 9);
    assert_eq!(universe.records()[0].sector, None);
}
