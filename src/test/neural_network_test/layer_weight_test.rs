use super::*;

#[test]
fn test_get_weights_borrows_dense_parameters() {
    let dense = Dense::new(3, 2).unwrap();
    match dense.get_weights() {
        LayerWeight::Dense(w) => {
            assert_eq!(w.weight, dense.weights());
            assert_eq!(w.bias.shape(), &[2, 1]);
        }
        _ => panic!("Expected Dense weights"),
    }
    assert!(matches!(ReLU::new().get_weights(), LayerWeight::Empty));
}

#[test]
fn test_serializable_weights_load_into_dense() {
    let source = Dense::new_with_rng(3, 2, &mut seeded_rng(5)).unwrap();
    let saved = SerializableLayerWeight::from_layer_weight(&source.get_weights());

    let mut target = Dense::new(3, 2).unwrap();
    target.load_weights(&saved).unwrap();

    assert_eq!(target.weights(), source.weights());
    assert_eq!(target.bias(), source.bias());
}

#[test]
fn test_serializable_weights_load_into_conv2d() {
    let source = Conv2D::new_with_rng(2, (2, 2), vec![3, 4, 4], &mut seeded_rng(6)).unwrap();
    let saved = SerializableLayerWeight::from_layer_weight(&source.get_weights());

    let json = serde_json::to_string(&saved).unwrap();
    let parsed: SerializableLayerWeight = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, saved);

    let mut target = Conv2D::new(2, (2, 2), vec![3, 4, 4]).unwrap();
    target.load_weights(&parsed).unwrap();

    assert_eq!(target.weights(), source.weights());
    assert_eq!(target.bias(), source.bias());
}

#[test]
fn test_load_weights_rejects_wrong_kind_and_shape() {
    let dense_weights =
        SerializableLayerWeight::from_layer_weight(&Dense::new(3, 2).unwrap().get_weights());

    let mut conv = Conv2D::new(1, (2, 2), vec![1, 3, 3]).unwrap();
    assert!(conv.load_weights(&dense_weights).is_err());

    let mut wider = Dense::new(4, 2).unwrap();
    assert!(wider.load_weights(&dense_weights).is_err());

    assert!(ReLU::new().load_weights(&dense_weights).is_err());
    assert!(ReLU::new().load_weights(&SerializableLayerWeight::Empty).is_ok());
}

#[test]
fn test_load_weights_rejects_ragged_arrays() {
    let ragged = SerializableLayerWeight::Dense(SerializableDenseWeight {
        weight: vec![vec![1.0, 2.0], vec![3.0]],
        bias: vec![vec![0.0], vec![0.0]],
    });

    let mut dense = Dense::new(2, 2).unwrap();
    assert!(matches!(
        dense.load_weights(&ragged),
        Err(crate::error::IoError::StdIoError(_))
    ));
}
