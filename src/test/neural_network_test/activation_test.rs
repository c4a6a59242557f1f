use super::*;

fn check_elementwise_gradient(layer: &mut dyn Layer, input: &Tensor) {
    let probe = generate_data(input.shape()).mapv(|v| v + 0.5);
    let numerical = numerical_input_grad(layer, input, &probe);

    layer.forward(input).unwrap();
    let analytic = layer.backward(&probe, 0.0).unwrap();

    assert_abs_diff_eq!(analytic, numerical, epsilon = GRAD_TOLERANCE);
}

#[test]
fn test_relu_forward_and_backward() {
    let mut relu = ReLU::new();
    let input = array![[-2.0], [0.0], [3.0]].into_dyn();

    let output = relu.forward(&input).unwrap();
    assert_eq!(output, array![[0.0], [0.0], [3.0]].into_dyn());

    let grad = relu.backward(&array![[1.0], [1.0], [1.0]].into_dyn(), 0.1).unwrap();
    assert_eq!(grad, array![[0.0], [0.0], [1.0]].into_dyn());
}

#[test]
fn test_sigmoid_values_and_clipping() {
    let mut sigmoid = Sigmoid::new();
    let input = array![[0.0], [1000.0], [-1000.0]].into_dyn();

    let output = sigmoid.forward(&input).unwrap();
    assert_relative_eq!(output[[0, 0]], 0.5);
    assert!(output.iter().all(|v| v.is_finite()));
    assert_abs_diff_eq!(output[[1, 0]], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(output[[2, 0]], 0.0, epsilon = 1e-12);
}

#[test]
fn test_tanh_forward() {
    let mut tanh = Tanh::new();
    let output = tanh.forward(&array![[0.5], [-0.5]].into_dyn()).unwrap();
    assert_relative_eq!(output[[0, 0]], 0.5f64.tanh());
    assert_relative_eq!(output[[1, 0]], -(0.5f64.tanh()));
}

#[test]
fn test_elementwise_gradients_match_finite_difference() {
    let input = generate_data(&[3, 4, 2]);
    check_elementwise_gradient(&mut Tanh::new(), &input);
    check_elementwise_gradient(&mut Sigmoid::new(), &input);

    // Keep ReLU inputs away from the kink at zero
    let shifted = input.mapv(|v| if v.abs() < 0.05 { v + 0.1 } else { v });
    check_elementwise_gradient(&mut ReLU::new(), &shifted);
}

#[test]
fn test_elementwise_large_tensor_matches_scalar_function() {
    // Above the parallel threshold
    let input = generate_data(&[120, 100]);
    let mut tanh = Tanh::new();
    let output = tanh.forward(&input).unwrap();

    for (&x, &y) in input.iter().zip(output.iter()) {
        assert_eq!(y, ElementwiseActivation::Tanh.apply(x));
    }
}

#[test]
fn test_activation_backward_before_forward() {
    let grad = array![[1.0]].into_dyn();
    assert!(matches!(
        Sigmoid::new().backward(&grad, 0.0),
        Err(ModelError::ProcessingError(_))
    ));
    assert!(matches!(
        Softmax::new().backward(&grad, 0.0),
        Err(ModelError::ProcessingError(_))
    ));
}

#[test]
fn test_activation_wrong_grad_shape_keeps_cache() {
    let input = array![[0.5], [-1.0]].into_dyn();
    let wrong = array![[1.0], [1.0], [1.0]].into_dyn();
    let grad = array![[1.0], [1.0]].into_dyn();

    let mut sigmoid = Sigmoid::new();
    sigmoid.forward(&input).unwrap();
    assert!(matches!(
        sigmoid.backward(&wrong, 0.0),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(sigmoid.backward(&grad, 0.0).is_ok());

    let mut softmax = Softmax::new();
    softmax.forward(&input).unwrap();
    assert!(matches!(
        softmax.backward(&wrong, 0.0),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(softmax.backward(&grad, 0.0).is_ok());
}

#[test]
fn test_activation_output_shape_reports_last_input() {
    let mut relu = ReLU::new();
    assert_eq!(relu.output_shape(), "Unknown");
    relu.forward(&Array3::zeros((2, 3, 3)).into_dyn()).unwrap();
    assert_eq!(relu.output_shape(), "(2, 3, 3)");
}

#[test]
fn test_softmax_output_is_probability_vector() {
    let mut softmax = Softmax::new();
    let output = softmax
        .forward(&array![[1.0], [2.0], [3.0], [-4.0]].into_dyn())
        .unwrap();

    assert!(output.iter().all(|&p| p > 0.0 && p < 1.0));
    assert_relative_eq!(output.sum(), 1.0, epsilon = 1e-12);
    assert!(output[[2, 0]] > output[[1, 0]] && output[[1, 0]] > output[[0, 0]]);
}

#[test]
fn test_softmax_is_stable_for_large_scores() {
    let mut softmax = Softmax::new();
    let output = softmax
        .forward(&array![[1000.0], [1000.0]].into_dyn())
        .unwrap();
    assert_eq!(output, array![[0.5], [0.5]].into_dyn());
}

#[test]
fn test_softmax_backward_matches_numerical_jvp() {
    let mut softmax = Softmax::new();
    let input = array![[0.2], [-1.3], [0.7], [2.1]].into_dyn();
    let probe = array![[1.0], [-0.5], [0.25], [2.0]].into_dyn();

    let numerical = numerical_input_grad(&mut softmax, &input, &probe);

    softmax.forward(&input).unwrap();
    let analytic = softmax.backward(&probe, 0.0).unwrap();

    assert_abs_diff_eq!(analytic, numerical, epsilon = GRAD_TOLERANCE);
    // Gradients of a probability vector sum to zero
    assert_abs_diff_eq!(analytic.sum(), 0.0, epsilon = 1e-12);
}
