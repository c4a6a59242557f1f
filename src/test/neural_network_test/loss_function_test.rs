use super::*;

#[test]
fn test_mse_loss_and_grad() {
    let mse = MeanSquaredError::new();
    let y_true = array![[1.0], [0.0]].into_dyn();
    let y_pred = array![[0.5], [1.0]].into_dyn();

    assert_relative_eq!(mse.compute_loss(&y_true, &y_pred).unwrap(), 0.625);
    assert_eq!(
        mse.compute_grad(&y_true, &y_pred).unwrap(),
        array![[-0.5], [1.0]].into_dyn()
    );
}

#[test]
fn test_bce_loss_and_grad() {
    let bce = BinaryCrossEntropy::new();
    let y_true = array![[1.0], [0.0]].into_dyn();
    let y_pred = array![[0.8], [0.4]].into_dyn();

    let expected_loss = -(0.8f64.ln() + 0.6f64.ln()) / 2.0;
    assert_relative_eq!(bce.compute_loss(&y_true, &y_pred).unwrap(), expected_loss);

    let grad = bce.compute_grad(&y_true, &y_pred).unwrap();
    assert_relative_eq!(grad[[0, 0]], -1.0 / 0.8 / 2.0);
    assert_relative_eq!(grad[[1, 0]], 1.0 / 0.6 / 2.0);
}

#[test]
fn test_bce_is_finite_at_saturated_predictions() {
    let bce = BinaryCrossEntropy::new();
    let y_true = array![[1.0], [0.0]].into_dyn();
    let y_pred = array![[1.0], [0.0]].into_dyn();

    let loss = bce.compute_loss(&y_true, &y_pred).unwrap();
    assert!(loss.is_finite());
    assert!(bce.compute_grad(&y_true, &y_pred).unwrap().iter().all(|g| g.is_finite()));
}

#[test]
fn test_cce_loss_and_grad() {
    let cce = CategoricalCrossEntropy::new();
    let y_true = array![[0.0], [1.0], [0.0]].into_dyn();
    let y_pred = array![[0.2], [0.5], [0.3]].into_dyn();

    assert_relative_eq!(cce.compute_loss(&y_true, &y_pred).unwrap(), -(0.5f64.ln()));

    let grad = cce.compute_grad(&y_true, &y_pred).unwrap();
    assert_eq!(grad[[0, 0]], 0.0);
    assert_relative_eq!(grad[[1, 0]], -2.0);
    assert_eq!(grad[[2, 0]], 0.0);
}

#[test]
fn test_cce_zero_probability_is_finite() {
    let cce = CategoricalCrossEntropy::new();
    let loss = cce
        .compute_loss(&array![[1.0], [0.0]].into_dyn(), &array![[0.0], [1.0]].into_dyn())
        .unwrap();
    assert_relative_eq!(loss, -(1e-100f64.ln()));
}

#[test]
fn test_scce_matches_cce_on_one_hot() {
    let scce = SparseCategoricalCrossEntropy::new();
    let cce = CategoricalCrossEntropy::new();
    let y_pred = array![[0.1], [0.6], [0.3]].into_dyn();
    let one_hot = array![[0.0], [0.0], [1.0]].into_dyn();
    let index = array![2.0].into_dyn();

    assert_relative_eq!(
        scce.compute_loss(&index, &y_pred).unwrap(),
        cce.compute_loss(&one_hot, &y_pred).unwrap()
    );
    assert_eq!(
        scce.compute_grad(&index, &y_pred).unwrap(),
        cce.compute_grad(&one_hot, &y_pred).unwrap()
    );
}

#[test]
fn test_scce_one_hot_uses_row_major_index() {
    let y_pred = Array2::from_elem((2, 3), 1.0 / 6.0).into_dyn();
    let one_hot = SparseCategoricalCrossEntropy::one_hot(&array![[4.0]].into_dyn(), &y_pred).unwrap();

    assert_eq!(one_hot.shape(), &[2, 3]);
    assert_eq!(one_hot[[1, 1]], 1.0);
    assert_eq!(one_hot.sum(), 1.0);
}

#[test]
fn test_scce_rejects_invalid_labels() {
    let scce = SparseCategoricalCrossEntropy::new();
    let y_pred = array![[0.5], [0.5]].into_dyn();

    for label in [
        array![2.0].into_dyn(),
        array![-1.0].into_dyn(),
        array![0.0, 1.0].into_dyn(),
        array![f64::NAN].into_dyn(),
        array![0.6].into_dyn(),
        array![1.4].into_dyn(),
    ] {
        assert!(matches!(
            scce.compute_loss(&label, &y_pred),
            Err(ModelError::InputValidationError(_))
        ));
    }
}

#[test]
fn test_losses_reject_shape_mismatch() {
    let y_true = array![[1.0], [0.0]].into_dyn();
    let y_pred = array![[0.5], [0.5], [0.0]].into_dyn();

    assert!(MeanSquaredError::new().compute_loss(&y_true, &y_pred).is_err());
    assert!(BinaryCrossEntropy::new().compute_grad(&y_true, &y_pred).is_err());
    assert!(CategoricalCrossEntropy::new().compute_loss(&y_true, &y_pred).is_err());
}
