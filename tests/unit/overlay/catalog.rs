use super::*;

#[test]
fn builtin_carries_the_stock_entries() {
    let cat = OverlayCatalog::builtin("assets");
    assert_eq!(cat.path_for("evento"), Some("1N.png"));
    assert_eq!(cat.path_for("hallfama"), Some("2N.png"));
    assert_eq!(cat.path_for("eventovip"), Some("3N.png"));
    assert_eq!(cat.default_id(), "evento");
    assert!(cat.contains("evento"));
    assert!(!cat.contains("carnaval"));
}

#[test]
fn resolve_joins_the_root() {
    let cat = OverlayCatalog::builtin("frames");
    assert_eq!(
        cat.resolve("hallfama"),
        Some(PathBuf::from("frames").join("2N.png"))
    );
    assert_eq!(cat.resolve("nope"), None);
}

#[test]
fn from_reader_parses_a_json_map() {
    let json = r#"{ "natal": "frames/natal.png", "festa": "festa.png" }"#;
    let cat = OverlayCatalog::from_reader(json.as_bytes(), ".").unwrap();
    assert_eq!(cat.path_for("natal"), Some("frames/natal.png"));
    assert_eq!(cat.path_for("festa"), Some("festa.png"));
    // No stock entry present, so the first identifier wins.
    assert_eq!(cat.default_id(), "festa");
}

#[test]
fn from_reader_prefers_the_stock_default_when_present() {
    let json = r#"{ "aniversario": "a.png", "evento": "e.png" }"#;
    let cat = OverlayCatalog::from_reader(json.as_bytes(), ".").unwrap();
    assert_eq!(cat.default_id(), "evento");
}

#[test]
fn from_reader_rejects_bad_catalogs() {
    assert!(OverlayCatalog::from_reader("{}".as_bytes(), ".").is_err());
    assert!(OverlayCatalog::from_reader("not json".as_bytes(), ".").is_err());
    assert!(OverlayCatalog::from_reader(r#"{ "x": "/abs.png" }"#.as_bytes(), ".").is_err());
    assert!(OverlayCatalog::from_reader(r#"{ "x": "../up.png" }"#.as_bytes(), ".").is_err());
    assert!(OverlayCatalog::from_reader(r#"{ "": "a.png" }"#.as_bytes(), ".").is_err());
}

#[test]
fn entries_iterate_in_identifier_order() {
    let cat = OverlayCatalog::builtin(".");
    let ids: Vec<_> = cat.entries().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["evento", "eventovip", "hallfama"]);
}

#[test]
fn normalize_rel_path_cleans_and_rejects() {
    assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/a.png").is_err());
    assert!(normalize_rel_path("a/../b.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}
