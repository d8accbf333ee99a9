//! Command-line training driver.
//!
//! Usage:
//!   synapse-nn --train mnist_train.csv --test mnist_test.csv --epochs 10
//!   synapse-nn                      # XOR toy run, no files needed

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use synapse_nn::data::{builtin_xor, load_labelled_csv_path, CsvOptions};
use synapse_nn::train::{evaluate, train_loop, TrainConfig};
use synapse_nn::{ActivationFunction, LossType, NetworkSpec};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActivationArg {
    Identity,
    Sigmoid,
    Relu,
    Tanh,
}

impl From<ActivationArg> for ActivationFunction {
    fn from(arg: ActivationArg) -> Self {
        match arg {
            ActivationArg::Identity => ActivationFunction::Identity,
            ActivationArg::Sigmoid => ActivationFunction::Sigmoid,
            ActivationArg::Relu => ActivationFunction::ReLU,
            ActivationArg::Tanh => ActivationFunction::Tanh,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "synapse-nn", about = "Train a feedforward network on labelled CSV data")]
struct Args {
    /// Training CSV (`label,f1,...,fN`); the XOR toy set is used when omitted
    #[arg(long)]
    train: Option<String>,

    /// Held-out CSV evaluated after training
    #[arg(long)]
    test: Option<String>,

    /// JSON network spec; overrides --sizes, activations and --learning-rate.
    /// --seed, when given, still replaces the spec's seed
    #[arg(long)]
    config: Option<String>,

    /// Write the effective network spec to this JSON file
    #[arg(long)]
    save_spec: Option<String>,

    /// Layer widths, input first
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    #[arg(long, value_enum, default_value = "sigmoid")]
    hidden_activation: ActivationArg,

    #[arg(long, value_enum)]
    output_activation: Option<ActivationArg>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    batch_size: Option<usize>,

    /// Seeds weight initialisation and shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Divisor applied to every feature value
    #[arg(long, default_value_t = 255.0)]
    scale: f64,

    /// Number of classes for one-hot targets
    #[arg(long, default_value_t = 10)]
    classes: usize,

    /// The CSV files have no header row
    #[arg(long)]
    no_header: bool,
}

fn build_spec(args: &Args, default_sizes: Vec<usize>, default_lr: f64, default_output: ActivationArg) -> Result<NetworkSpec> {
    if let Some(path) = &args.config {
        let mut spec = NetworkSpec::load_json(path)
            .with_context(|| format!("failed to load network spec from {path}"))?;
        if let Some(seed) = args.seed {
            spec = spec.with_seed(seed);
        }
        return Ok(spec);
    }

    let sizes = args.sizes.clone().unwrap_or(default_sizes);
    let transitions = sizes.len().saturating_sub(1);
    let mut activations = vec![ActivationFunction::from(args.hidden_activation); transitions];
    if let Some(last) = activations.last_mut() {
        *last = args.output_activation.unwrap_or(default_output).into();
    }

    let spec = NetworkSpec {
        sizes,
        activations,
        loss: LossType::Mse,
        learning_rate: args.learning_rate.unwrap_or(default_lr),
        seed: args.seed,
    };
    spec.validate().context("invalid network configuration")?;
    Ok(spec)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let csv_options = CsvOptions {
        n_classes: args.classes,
        scale: args.scale,
        has_header: !args.no_header,
    };

    let (dataset, spec, mut config) = match &args.train {
        Some(path) => {
            let dataset = load_labelled_csv_path(path, &csv_options)
                .with_context(|| format!("failed to load training data from {path}"))?;
            let spec = build_spec(&args, vec![dataset.input_size(), 128, 64, args.classes], 0.01, ActivationArg::Relu)?;
            (dataset, spec, TrainConfig::new(10, 32))
        }
        None => {
            info!("no --train file given, running the XOR toy problem");
            let spec = build_spec(&args, vec![2, 4, 1], 0.5, ActivationArg::Sigmoid)?;
            (builtin_xor(), spec, TrainConfig::new(2000, 4))
        }
    };
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }

    if let Some(path) = &args.save_spec {
        spec.save_json(path).with_context(|| format!("failed to write network spec to {path}"))?;
        info!(path = %path, "saved network spec");
    }

    info!(sizes = ?spec.sizes, activations = ?spec.activations, learning_rate = spec.learning_rate, "building network");
    let mut network = spec.build()?;

    let mut rng = match spec.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let history = train_loop(&mut network, &dataset, &config, &mut rng)?;
    if let Some(last) = history.last() {
        info!(loss = last.train_loss, accuracy = last.train_accuracy, "training finished");
    }

    match &args.test {
        Some(path) => {
            let test_set = load_labelled_csv_path(path, &csv_options)
                .with_context(|| format!("failed to load test data from {path}"))?;
            let eval = evaluate(&mut network, &test_set)?;
            info!(
                loss = eval.loss,
                correct = eval.correct,
                total = eval.total,
                "model accuracy: {:.2}%",
                eval.accuracy * 100.0
            );
        }
        None if args.train.is_none() => {
            for input in &dataset.inputs {
                let output = network.forward(input)?;
                info!("input {:?} -> output {:.4}", input.as_slice(), output.as_slice()[0]);
            }
        }
        None => warn!("no --test file given, skipping held-out evaluation"),
    }

    Ok(())
}
