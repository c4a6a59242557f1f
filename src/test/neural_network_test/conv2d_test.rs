use super::*;

#[test]
fn test_conv2d_all_ones_filter() {
    let mut conv = Conv2D::new(1, (2, 2), vec![1, 3, 3]).unwrap();
    conv.set_weights(Array4::ones((1, 1, 2, 2)), Array3::zeros((1, 2, 2)))
        .unwrap();

    let output = conv.forward(&Array3::ones((1, 3, 3)).into_dyn()).unwrap();
    assert_eq!(output, Array3::from_elem((1, 2, 2), 4.0).into_dyn());
}

#[test]
fn test_conv2d_is_cross_correlation() {
    // An asymmetric kernel tells correlation and convolution apart
    let mut conv = Conv2D::new(1, (1, 2), vec![1, 1, 3]).unwrap();
    conv.set_weights(array![[[[1.0, 10.0]]]], Array3::zeros((1, 1, 2)))
        .unwrap();

    let output = conv.forward(&array![[[1.0, 2.0, 3.0]]].into_dyn()).unwrap();
    assert_eq!(output, array![[[21.0, 32.0]]].into_dyn());
}

#[test]
fn test_conv2d_sums_over_channels_and_adds_bias() {
    let mut conv = Conv2D::new(2, (1, 1), vec![2, 1, 2]).unwrap();
    conv.set_weights(
        array![[[[1.0]], [[2.0]]], [[[-1.0]], [[0.0]]]],
        array![[[0.5, 0.5]], [[1.0, 2.0]]],
    )
    .unwrap();

    let input = array![[[1.0, 2.0]], [[3.0, 4.0]]].into_dyn();
    let output = conv.forward(&input).unwrap();

    assert_eq!(output.shape(), &[2, 1, 2]);
    assert_eq!(output, array![[[7.5, 10.5]], [[0.0, 0.0]]].into_dyn());
}

#[test]
fn test_conv2d_output_shape() {
    let mut conv = Conv2D::new(4, (3, 2), vec![2, 6, 5]).unwrap();
    let output = conv.forward(&generate_data(&[2, 6, 5])).unwrap();

    assert_eq!(output.shape(), &[4, 4, 4]);
    assert_eq!(conv.output_shape(), "(4, 4, 4)");
    assert_eq!(
        conv.param_count(),
        TrainingParameters::Trainable(4 * 2 * 3 * 2 + 4 * 4 * 4)
    );
}

#[test]
fn test_conv2d_rejects_invalid_configuration() {
    assert!(Conv2D::new(0, (2, 2), vec![1, 3, 3]).is_err());
    assert!(Conv2D::new(1, (0, 2), vec![1, 3, 3]).is_err());
    assert!(Conv2D::new(1, (4, 2), vec![1, 3, 3]).is_err());
    assert!(Conv2D::new(1, (2, 2), vec![3, 3]).is_err());
}

#[test]
fn test_conv2d_rejects_wrong_input_shape() {
    let mut conv = Conv2D::new(1, (2, 2), vec![1, 3, 3]).unwrap();
    let result = conv.forward(&Array3::ones((2, 3, 3)).into_dyn());
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn test_conv2d_backward_before_forward() {
    let mut conv = Conv2D::new(1, (2, 2), vec![1, 3, 3]).unwrap();
    let result = conv.backward(&Array3::ones((1, 2, 2)).into_dyn(), 0.1);
    assert!(matches!(result, Err(ModelError::ProcessingError(_))));
}

#[test]
fn test_conv2d_wrong_grad_shape_keeps_cache() {
    let mut conv = Conv2D::new(1, (2, 2), vec![1, 3, 3]).unwrap();
    conv.forward(&generate_data(&[1, 3, 3])).unwrap();

    let result = conv.backward(&Array3::ones((1, 3, 3)).into_dyn(), 0.1);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));

    let grad_input = conv.backward(&Array3::ones((1, 2, 2)).into_dyn(), 0.1).unwrap();
    assert_eq!(grad_input.shape(), &[1, 3, 3]);
}

#[test]
fn test_conv2d_input_gradient_matches_finite_difference() {
    let mut conv = Conv2D::new_with_rng(3, (2, 3), vec![2, 4, 5], &mut seeded_rng(11)).unwrap();
    let input = generate_data(&[2, 4, 5]);
    let probe = generate_data(&[3, 3, 3]).mapv(|v| v * 0.5 + 0.1);

    let numerical = numerical_input_grad(&mut conv, &input, &probe);

    conv.forward(&input).unwrap();
    let analytic = conv.backward(&probe, 0.0).unwrap();

    assert_abs_diff_eq!(analytic, numerical, epsilon = GRAD_TOLERANCE);
}

#[test]
fn test_conv2d_parameter_gradient_matches_finite_difference() {
    let mut conv = Conv2D::new_with_rng(2, (2, 2), vec![2, 3, 3], &mut seeded_rng(12)).unwrap();
    let input = generate_data(&[2, 3, 3]);
    let probe = generate_data(&[2, 2, 2]);

    let weights = conv.weights().clone();
    let bias = conv.bias().clone();

    let mut numerical_weights = Array4::<f64>::zeros(weights.raw_dim());
    for (index, slot) in numerical_weights.indexed_iter_mut() {
        let mut plus = weights.clone();
        plus[index] += FD_STEP;
        conv.set_weights(plus, bias.clone()).unwrap();
        let f_plus = probe_objective(&mut conv, &input, &probe);

        let mut minus = weights.clone();
        minus[index] -= FD_STEP;
        conv.set_weights(minus, bias.clone()).unwrap();
        let f_minus = probe_objective(&mut conv, &input, &probe);

        *slot = (f_plus - f_minus) / (2.0 * FD_STEP);
    }

    conv.set_weights(weights.clone(), bias.clone()).unwrap();
    conv.forward(&input).unwrap();
    conv.backward(&probe, 1.0).unwrap();

    let analytic_weights = &weights - conv.weights();
    let analytic_bias = &bias - conv.bias();

    assert_abs_diff_eq!(analytic_weights, numerical_weights, epsilon = GRAD_TOLERANCE);
    assert_abs_diff_eq!(
        analytic_bias,
        probe.into_dimensionality::<Ix3>().unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_conv2d_parallel_path_matches_sequential_path() {
    // Same parameters, one layer above the parallel threshold and one evaluated per filter below it
    let input = generate_data(&[4, 12, 12]);
    let mut large = Conv2D::new_with_rng(16, (3, 3), vec![4, 12, 12], &mut seeded_rng(21)).unwrap();
    let large_output = large.forward(&input).unwrap();

    for f in 0..16 {
        let mut single = Conv2D::new(1, (3, 3), vec![4, 12, 12]).unwrap();
        single
            .set_weights(
                large.weights().slice(s![f..f + 1, .., .., ..]).to_owned(),
                large.bias().slice(s![f..f + 1, .., ..]).to_owned(),
            )
            .unwrap();
        let single_output = single.forward(&input).unwrap();

        assert_eq!(
            single_output.index_axis(Axis(0), 0),
            large_output.index_axis(Axis(0), f)
        );
    }
}
