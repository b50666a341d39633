//! Configuration loading tests

use hashrate_scout::config::Config;
use hashrate_scout::model::ReferencePriceModel;
use hashrate_scout::Pipeline;
use rust_decimal_macros::dec;

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.analysis.min_capacity, dec!(10));
    assert_eq!(config.analysis.min_declared_return, dec!(20));
    assert_eq!(config.analysis.max_results, 5);
    assert_eq!(config.extraction.max_capacity, dec!(5000));
    assert!(Pipeline::from_config(&config).is_ok());
}

#[test]
fn test_config_file_overrides_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
            [[pricing.anchors]]
            capacity = 10
            price_per_unit = 20

            [[pricing.anchors]]
            capacity = 110
            price_per_unit = 15
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let pipeline = Pipeline::from_config(&config).unwrap();
    assert_eq!(pipeline.engine().model().reference_price(dec!(60)), dec!(17.5));
}
