use super::*;

#[test]
fn test_train_config_defaults() {
    let config = TrainConfig::default();
    assert_eq!(config.epochs, 1000);
    assert_eq!(config.learning_rate, 0.01);
    assert_eq!(config.validation_split, None);
    assert!(config.verbose);
}

#[test]
fn test_train_config_builder_validation() {
    assert!(TrainConfig::new(0, 0.1).is_err());
    assert!(TrainConfig::new(10, 0.0).is_err());
    assert!(TrainConfig::new(10, f64::NAN).is_err());

    let config = TrainConfig::new(10, 0.1).unwrap();
    assert!(config.clone().with_validation_split(0.0).is_err());
    assert!(config.clone().with_validation_split(1.0).is_err());
    assert_eq!(
        config.with_validation_split(0.2).unwrap().validation_split,
        Some(0.2)
    );
}

#[test]
fn test_train_config_from_json_fills_defaults() {
    let config = TrainConfig::from_json_str(r#"{ "epochs": 20, "verbose": false }"#).unwrap();
    assert_eq!(config.epochs, 20);
    assert_eq!(config.learning_rate, 0.01);
    assert!(!config.verbose);
}

#[test]
fn test_train_config_from_json_rejects_bad_values() {
    assert!(matches!(
        TrainConfig::from_json_str(r#"{ "validation_split": 1.5 }"#),
        Err(crate::error::IoError::StdIoError(_))
    ));
    assert!(matches!(
        TrainConfig::from_json_str(r#"{ "epochs": "many" }"#),
        Err(crate::error::IoError::JsonError(_))
    ));
}

#[test]
fn test_epoch_report_format() {
    let summary = EpochSummary {
        epoch: 3,
        loss: 0.123456,
        val_loss: None,
    };
    assert_eq!(format_epoch_report(&summary, 10), "Epoch 3/10, loss: 0.1235");

    let summary = EpochSummary {
        val_loss: Some(0.5),
        ..summary
    };
    assert_eq!(
        format_epoch_report(&summary, 10),
        "Epoch 3/10, loss: 0.1235 - val loss: 0.5000"
    );
}
