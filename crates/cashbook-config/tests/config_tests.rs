use cashbook_config::{Config, ConfigError, ConfigManager};
use rust_decimal::Decimal;
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert!(!cfg.bank_books.is_empty());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.business_units = vec!["Dairy".to_string()];
    cfg.reconciliation_tolerance = Decimal::new(5, 1);

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn backups_restore_previous_settings() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let original = Config::default();
    manager.save(&original).expect("save");
    let name = manager
        .backup(&original, Some("before change"))
        .expect("backup");
    assert!(name.ends_with("_before-change.json"));

    let mut changed = original.clone();
    changed.currency = "USD".into();
    manager.save(&changed).expect("save changed");

    assert_eq!(manager.list_backups().expect("list"), vec![name.clone()]);
    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.currency, original.currency);
    assert_eq!(manager.load().expect("reload").currency, original.currency);
}

#[test]
fn restoring_unknown_backup_fails() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let err = manager.restore("config_missing.json").unwrap_err();
    assert!(matches!(err, ConfigError::BackupNotFound(_)));
}
