use rand::rngs::StdRng;
use rand::SeedableRng;
use synapse_nn::{ActivationFunction, Matrix, MseLoss, Network};

fn main() -> synapse_nn::Result<()> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::new(
        &[2, 3, 1],
        vec![ActivationFunction::Sigmoid.boxed(), ActivationFunction::Sigmoid.boxed()],
        Box::new(MseLoss),
        0.5,
        &mut rng,
    )?;

    let inputs = vec![
        Matrix::column(vec![1.0, 0.0]),
        Matrix::column(vec![1.0, 1.0]),
        Matrix::column(vec![0.0, 1.0]),
        Matrix::column(vec![0.0, 0.0]),
    ];
    let expected_outputs = vec![
        Matrix::column(vec![1.0]),
        Matrix::column(vec![0.0]),
        Matrix::column(vec![1.0]),
        Matrix::column(vec![0.0]),
    ];

    for round in 0..10 {
        network.train(&inputs, &expected_outputs, 1000)?;
        let mut loss = 0.0;
        for (input, target) in inputs.iter().zip(&expected_outputs) {
            loss += network.loss(input, target)?;
        }
        println!("Epoch {}: loss = {:.6}", (round + 1) * 1000, loss / inputs.len() as f64);
    }

    for input in &inputs {
        let output = network.forward(input)?;
        println!("Input: {:?} -> Output: {:.4}", input.as_slice(), output.get(0, 0)?);
    }
    Ok(())
}
