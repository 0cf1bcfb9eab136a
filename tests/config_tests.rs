use menu_core::config::{ConfigManager, MarginConfig};
use menu_core::margin::GradeBands;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let temp = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config, MarginConfig::default());
}

#[test]
fn save_and_load_round_trip() {
    let temp = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let config = MarginConfig {
        bands: GradeBands {
            safe_min: 45.0,
            mid_min: 35.0,
            warning_min: 25.0,
        },
        target_margin_pct: 35.0,
        price_rounding_unit: 500,
    };
    manager.save(&config).unwrap();
    assert!(manager.path().exists());
    let loaded = manager.load().unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn backup_names_carry_timestamp_and_note() {
    let temp = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let name = manager
        .backup(&MarginConfig::default(), Some("Spring Menu"))
        .unwrap();
    assert!(name.starts_with("config_"));
    assert!(name.ends_with(".json"));
    assert!(name.contains("spring-menu"));

    let listed = manager.list_backups().unwrap();
    assert_eq!(listed, vec![name.clone()]);

    let restored = manager.restore(&name).unwrap();
    assert_eq!(restored, MarginConfig::default());
}

#[test]
fn restoring_a_missing_backup_fails() {
    let temp = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    assert!(manager.restore("config_19700101_0000.json").is_err());
}
