use super::*;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/catalog.yaml")
}

#[test]
fn parses_extract_command() {
    let cli = Cli::try_parse_from([
        "prodex-cli",
        "extract",
        "--site-url",
        "https://shop.example",
        "--variations",
        "--limit",
        "-1",
        "--products",
        "5,9",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Extract {
            variations,
            limit,
            products,
            ..
        } => {
            assert!(variations);
            assert_eq!(limit, Some(-1));
            assert_eq!(products.as_deref(), Some("5,9"));
        }
        Commands::Validate => panic!("expected extract"),
    }
}

#[test]
fn parses_validate_with_catalog_path() {
    let cli = Cli::try_parse_from(["prodex-cli", "validate", "--catalog", "/tmp/c.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Validate));
    assert_eq!(cli.catalog, PathBuf::from("/tmp/c.yaml"));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["prodex-cli"]).is_err());
}

#[test]
fn sample_catalog_validates() {
    let summary = run_validate(&fixture()).expect("sample catalog should validate");
    assert!(summary.contains("products"));
    assert!(summary.contains("variations"));
}

#[test]
fn extract_prints_envelope_for_sample_catalog() {
    let params = RawParams {
        limit: Some("-1".to_owned()),
        ..RawParams::default()
    };
    let output = run_extract(&fixture(), "https://shop.example", &params, 10)
        .expect("extraction should succeed");
    let json: serde_json::Value = serde_json::from_str(&output).expect("valid json");

    assert!(json["products"].as_array().is_some_and(|p| !p.is_empty()));
    assert!(json["count"].as_u64().is_some());
    assert_eq!(json["metadata"]["plugin_version"], env!("CARGO_PKG_VERSION"));
}
