use super::*;

fn quiet_config(epochs: usize, learning_rate: f64) -> TrainConfig {
    TrainConfig::new(epochs, learning_rate)
        .unwrap()
        .with_verbose(false)
}

fn truth_table() -> (Vec<Tensor>, Vec<Tensor>) {
    let x = vec![
        array![[0.0], [0.0]].into_dyn(),
        array![[0.0], [1.0]].into_dyn(),
        array![[1.0], [0.0]].into_dyn(),
        array![[1.0], [1.0]].into_dyn(),
    ];
    let y = vec![
        array![[0.0], [0.0]].into_dyn(),
        array![[0.0], [1.0]].into_dyn(),
        array![[0.0], [1.0]].into_dyn(),
        array![[1.0], [1.0]].into_dyn(),
    ];
    (x, y)
}

fn seeded_dense_sigmoid_model(seed: u64) -> Sequential {
    let mut rng = seeded_rng(seed);
    let mut model = Sequential::new();
    model
        .add(Dense::new_with_rng(2, 2, &mut rng).unwrap())
        .add(Sigmoid::new())
        .compile(MeanSquaredError::new());
    model
}

#[test]
fn test_fit_requires_compile() {
    let (x, y) = truth_table();
    let mut model = Sequential::new();
    model.add(Dense::new(2, 2).unwrap());

    let result = model.fit(&x, &y, &quiet_config(1, 0.1));
    assert!(matches!(result, Err(ModelError::NotCompiled)));
}

#[test]
fn test_fit_rejects_invalid_inputs() {
    let (x, y) = truth_table();
    let config = quiet_config(1, 0.1);

    let mut empty = Sequential::new();
    empty.compile(MeanSquaredError::new());
    assert!(matches!(
        empty.fit(&x, &y, &config),
        Err(ModelError::InputValidationError(_))
    ));

    let mut model = seeded_dense_sigmoid_model(0);
    assert!(model.fit(&x[..3], &y, &config).is_err());
    assert!(model.fit(&[], &[], &config).is_err());

    let mut bad_config = config.clone();
    bad_config.learning_rate = -1.0;
    assert!(model.fit(&x, &y, &bad_config).is_err());
}

#[test]
fn test_fit_rejects_split_with_empty_partition() {
    let (x, y) = truth_table();
    let mut model = seeded_dense_sigmoid_model(0);

    // floor(0.9 * 4) = 3 training pairs, one validation pair
    let config = quiet_config(1, 0.1).with_validation_split(0.1).unwrap();
    assert!(model.fit(&x, &y, &config).is_ok());

    // floor(0.8 * 1) = 0 training pairs
    let config = quiet_config(1, 0.1).with_validation_split(0.2).unwrap();
    assert!(matches!(
        model.fit(&x[..1], &y[..1], &config),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_fit_reduces_loss_on_truth_table() {
    let (x, y) = truth_table();
    let mut model = seeded_dense_sigmoid_model(42);

    let history = model.fit(&x, &y, &quiet_config(200, 1.0)).unwrap();
    let losses = history.losses();

    assert_eq!(losses.len(), 200);
    assert!(history.val_losses().is_empty());
    assert!(losses[199] < losses[0]);
}

#[test]
fn test_fit_with_validation_records_val_loss() {
    let (x, y) = truth_table();
    let mut model = seeded_dense_sigmoid_model(1);

    let config = quiet_config(5, 0.5).with_validation_split(0.25).unwrap();
    let history = model.fit(&x, &y, &config).unwrap();

    assert_eq!(history.len(), 5);
    assert_eq!(history.val_losses().len(), 5);
    let last = history.last().unwrap();
    assert_eq!(last.epoch, 5);

    // The validation loss is the held-out pair's loss after the final epoch
    let expected = model.evaluate(&x[3..], &y[3..]).unwrap();
    assert_relative_eq!(last.val_loss.unwrap(), expected);
}

#[test]
fn test_single_epoch_matches_manual_updates() {
    let (x, y) = truth_table();
    let mut model = seeded_dense_sigmoid_model(9);

    let mut dense = Dense::new_with_rng(2, 2, &mut seeded_rng(9)).unwrap();
    let mut sigmoid = Sigmoid::new();
    let mse = MeanSquaredError::new();
    let learning_rate = 0.3;

    let mut expected_loss = 0.0;
    for (input, label) in x.iter().zip(&y) {
        let hidden = dense.forward(input).unwrap();
        let output = sigmoid.forward(&hidden).unwrap();
        expected_loss += mse.compute_loss(label, &output).unwrap();
        let grad = mse.compute_grad(label, &output).unwrap();
        let grad = sigmoid.backward(&grad, learning_rate).unwrap();
        dense.backward(&grad, learning_rate).unwrap();
    }
    expected_loss /= x.len() as f64;

    let history = model.fit(&x, &y, &quiet_config(1, learning_rate)).unwrap();
    assert_relative_eq!(history.losses()[0], expected_loss);

    match model.get_weights()[0] {
        LayerWeight::Dense(ref w) => {
            assert_eq!(w.weight, dense.weights());
            assert_eq!(w.bias, dense.bias());
        }
        _ => panic!("Expected Dense weights"),
    }
}

#[test]
fn test_predict_is_composition_of_layers() {
    let mut rng = seeded_rng(3);
    let mut model = Sequential::new();
    model
        .add(Dense::new_with_rng(3, 4, &mut rng).unwrap())
        .add(Tanh::new())
        .add(Dense::new_with_rng(4, 2, &mut rng).unwrap())
        .add(Softmax::new());

    let mut rng = seeded_rng(3);
    let mut first = Dense::new_with_rng(3, 4, &mut rng).unwrap();
    let mut second = Dense::new_with_rng(4, 2, &mut rng).unwrap();

    let input = generate_data(&[3, 1]);
    let expected = Softmax::new()
        .forward(
            &second
                .forward(&Tanh::new().forward(&first.forward(&input).unwrap()).unwrap())
                .unwrap(),
        )
        .unwrap();

    assert_eq!(model.predict(&input).unwrap(), expected);
}

#[test]
fn test_predict_is_idempotent_with_dropout() {
    let mut model = Sequential::new();
    model
        .add(Dense::new(6, 6).unwrap())
        .add(Dropout::with_random_state(0.5, vec![6, 1], 4).unwrap())
        .add(Dense::new(6, 3).unwrap());

    let input = generate_data(&[6, 1]);
    let first = model.predict(&input).unwrap();
    let second = model.predict(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_predict_on_empty_model() {
    let mut model = Sequential::new();
    assert!(model.predict(&array![[1.0]].into_dyn()).is_err());
    assert!(model.is_empty());
}

#[test]
fn test_predict_class_and_accuracy() {
    let mut model = Sequential::new();
    let mut dense = Dense::new(2, 2).unwrap();
    dense
        .set_weights(array![[1.0, 0.0], [0.0, 1.0]], array![[0.0], [0.0]])
        .unwrap();
    model.add(dense).add(Softmax::new());

    let x = vec![
        array![[3.0], [1.0]].into_dyn(),
        array![[0.0], [2.0]].into_dyn(),
        array![[5.0], [4.0]].into_dyn(),
    ];
    assert_eq!(model.predict_class(&x[0]).unwrap(), 0);
    assert_eq!(model.predict_class(&x[1]).unwrap(), 1);

    assert_relative_eq!(model.accuracy(&x, &[0, 1, 1]).unwrap(), 2.0 / 3.0);
    assert!(model.accuracy(&x, &[0, 1]).is_err());
}

#[test]
fn test_predict_class_rejects_nan_output() {
    let mut model = Sequential::new();
    let mut dense = Dense::new(2, 2).unwrap();
    dense
        .set_weights(array![[f64::NAN, 0.0], [0.0, 1.0]], array![[0.0], [0.0]])
        .unwrap();
    model.add(dense);

    // NaN lands in the first element, a finite value in the last
    let result = model.predict_class(&array![[1.0], [2.0]].into_dyn());
    assert!(matches!(result, Err(ModelError::ProcessingError(_))));

    let x = vec![array![[1.0], [2.0]].into_dyn()];
    assert!(model.accuracy(&x, &[1]).is_err());
}

#[test]
fn test_evaluate_does_not_update_parameters() {
    let (x, y) = truth_table();
    let mut model = seeded_dense_sigmoid_model(5);

    let before = model.evaluate(&x, &y).unwrap();
    let after = model.evaluate(&x, &y).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_summary_and_len() {
    let mut model = Sequential::new();
    model
        .add(Conv2D::new(2, (3, 3), vec![1, 6, 6]).unwrap())
        .add(MaxPooling2D::new((2, 2), vec![2, 4, 4]).unwrap())
        .add(Flatten::new(vec![2, 2, 2]).unwrap())
        .add(Dense::new(8, 2).unwrap());

    assert_eq!(model.len(), 4);
    model.summary();
}
