use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::loss::loss_type::LossType;
use crate::network::network::Network;

fn default_learning_rate() -> f64 {
    0.01
}

/// Serializable description of a network architecture and its training
/// hyperparameters.
///
/// Only the architecture is stored; trained weights are never written out.
///
/// Fields:
/// - `sizes`: layer widths, input first (e.g. `[784, 128, 64, 10]`)
/// - `activations`: one activation per transition, `sizes.len() - 1` entries
/// - `loss`: pointwise cost used by `Network::train`
/// - `learning_rate`: SGD step size, defaults to 0.01
/// - `seed`: seeds weight initialisation when set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub sizes: Vec<usize>,
    pub activations: Vec<ActivationFunction>,
    pub loss: LossType,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    /// Same activation on every transition.
    pub fn uniform(sizes: Vec<usize>, activation: ActivationFunction, loss: LossType, learning_rate: f64) -> Self {
        let activations = vec![activation; sizes.len().saturating_sub(1)];
        NetworkSpec { sizes, activations, loss, learning_rate, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks everything `Network::new` would reject, without allocating layers.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.len() < 2 {
            return Err(Error::config("spec needs at least an input and an output width"));
        }
        if self.activations.len() != self.sizes.len() - 1 {
            return Err(Error::config(format!(
                "spec lists {} activations for {} layer transitions",
                self.activations.len(),
                self.sizes.len() - 1
            )));
        }
        if self.sizes.contains(&0) {
            return Err(Error::config("spec contains a zero layer width"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::config(format!(
                "learning rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Builds a freshly initialised network. Uses a seeded RNG when `seed`
    /// is set, OS entropy otherwise.
    pub fn build(&self) -> Result<Network> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let activations = self.activations.iter().map(|a| a.boxed()).collect();
        Network::new(&self.sizes, activations, self.loss.boxed(), self.learning_rate, &mut rng)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_spec() -> NetworkSpec {
        NetworkSpec::uniform(vec![2, 3, 1], ActivationFunction::Sigmoid, LossType::Mse, 0.5)
    }

    #[test]
    fn test_uniform_fills_activations() {
        let spec = xor_spec();
        assert_eq!(spec.activations.len(), 2);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_specs() {
        let mut spec = xor_spec();
        spec.sizes = vec![5];
        assert!(matches!(spec.validate(), Err(Error::Config(_))));

        let mut spec = xor_spec();
        spec.activations.pop();
        assert!(matches!(spec.build(), Err(Error::Config(_))));

        let mut spec = xor_spec();
        spec.learning_rate = 0.0;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_seeded_build_is_deterministic() {
        let spec = xor_spec().with_seed(11);
        let a = spec.build().unwrap();
        let b = spec.build().unwrap();
        for (la, lb) in a.layers().iter().zip(b.layers()) {
            assert_eq!(la.weights(), lb.weights());
        }
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let json = r#"{
            "sizes": [784, 128, 64, 10],
            "activations": ["Sigmoid", "Sigmoid", "ReLU"],
            "loss": "mse"
        }"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.learning_rate, 0.01);
        assert_eq!(spec.seed, None);
        assert_eq!(spec.activations[2], ActivationFunction::ReLU);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("synapse_nn_spec_{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let spec = xor_spec().with_seed(3);
        spec.save_json(path).unwrap();
        let loaded = NetworkSpec::load_json(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(loaded, spec);
    }
}
