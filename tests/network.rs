use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use synapse_nn::{
    ActivationFunction, Error, FnActivation, Layer, Matrix, MseLoss, Network, NetworkSpec, LossType,
};

fn identity_layer(input_size: usize, output_size: usize) -> Layer {
    Layer::from_parameters(
        Matrix::zeros(output_size, input_size),
        Matrix::zeros(output_size, 1),
        ActivationFunction::Identity.boxed(),
    )
    .unwrap()
}

#[test]
fn matrix_algebra_identities() {
    let a = Matrix::from_vec(2, 2, vec![1.5, -2.0, 0.25, 4.0]).unwrap();
    assert_eq!(a.add(&Matrix::identity(2).map(|x| x * 0.0)).unwrap(), a);
    assert_eq!(a.multiply(&Matrix::identity(2)).unwrap(), a);
    assert_eq!(a.transpose().transpose(), a);

    let b = Matrix::new(2, 5, 1.0);
    assert_eq!(a.multiply(&b).unwrap().shape(), (2, 5));
    assert!(matches!(b.multiply(&a), Err(Error::Shape { .. })));
}

#[test]
fn layer_forward_matches_hand_computation() {
    let weights = Matrix::from_vec(2, 3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
    let mut layer =
        Layer::from_parameters(weights, Matrix::zeros(2, 1), ActivationFunction::Sigmoid.boxed()).unwrap();

    let out = layer.forward(&Matrix::column(vec![0.0, 2.0, 7.0])).unwrap();
    assert_abs_diff_eq!(out.get(0, 0).unwrap(), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(out.get(1, 0).unwrap(), 1.0 / (1.0 + (-2.0f64).exp()), epsilon = 1e-12);
    assert_eq!(layer.output(), &out);
}

#[test]
fn zero_gradient_gives_zero_delta() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut layer = Layer::new(3, 2, ActivationFunction::Tanh.boxed(), &mut rng).unwrap();
    layer.forward(&Matrix::column(vec![0.1, 0.2, 0.3])).unwrap();
    let d_input = layer.backward(&Matrix::zeros(2, 1)).unwrap();
    assert_eq!(layer.delta(), &Matrix::zeros(2, 1));
    assert_eq!(d_input, Matrix::zeros(3, 1));
}

#[test]
fn one_training_step_decreases_loss() {
    let mut net = Network::from_layers(
        vec![identity_layer(2, 2), identity_layer(2, 1)],
        Box::new(MseLoss),
        0.1,
    )
    .unwrap();
    let input = Matrix::column(vec![1.0, 1.0]);
    let target = Matrix::column(vec![1.0]);

    let before = net.loss(&input, &target).unwrap();
    net.train(&[input.clone()], &[target.clone()], 1).unwrap();
    let after = net.loss(&input, &target).unwrap();

    assert_abs_diff_eq!(before, 0.5, epsilon = 1e-12);
    // Only the output bias moves: b = 0 + 0.1 * 1.
    assert_abs_diff_eq!(after, 0.5 * 0.9 * 0.9, epsilon = 1e-12);
}

#[test]
fn invalid_construction_and_training_arguments() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        Network::new(&[5], vec![], Box::new(MseLoss), 0.1, &mut rng),
        Err(Error::Config(_))
    ));

    let mut net = NetworkSpec::uniform(vec![2, 2, 1], ActivationFunction::Sigmoid, LossType::Mse, 0.1)
        .with_seed(5)
        .build()
        .unwrap();
    let before: Vec<(Matrix, Matrix)> = net
        .layers()
        .iter()
        .map(|l| (l.weights().clone(), l.biases().clone()))
        .collect();

    let err = net.train(&[Matrix::column(vec![1.0, 1.0])], &[], 1).unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let after: Vec<(Matrix, Matrix)> = net
        .layers()
        .iter()
        .map(|l| (l.weights().clone(), l.biases().clone()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn custom_activation_pair_trains() {
    // Softplus-style pair supplied as closures.
    let softplus = FnActivation::new("softplus", |x: f64| (1.0 + x.exp()).ln(), |x: f64| 1.0 / (1.0 + (-x).exp()));
    let mut rng = StdRng::seed_from_u64(17);
    let mut net = Network::new(
        &[1, 1],
        vec![softplus.boxed()],
        Box::new(MseLoss),
        0.05,
        &mut rng,
    )
    .unwrap();

    let inputs: Vec<Matrix> = (0..5).map(|i| Matrix::column(vec![i as f64 / 5.0])).collect();
    let targets: Vec<Matrix> = (0..5).map(|i| Matrix::column(vec![1.0 + i as f64 / 5.0])).collect();

    let mean = |net: &mut Network| -> f64 {
        inputs.iter().zip(&targets).map(|(x, y)| net.loss(x, y).unwrap()).sum::<f64>() / 5.0
    };
    let before = mean(&mut net);
    net.train(&inputs, &targets, 200).unwrap();
    assert!(mean(&mut net) < before);
}
