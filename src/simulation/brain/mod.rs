//! Feed-forward controller network and its genetic operators.
//!
//! A brain maps the range-finder readings to a steering and a throttle
//! command. Its weights and biases are the genome evolved by the engine.

use ndarray::Array1;
use rand::Rng;

pub mod layer;

pub use layer::Layer;

/// Steering and throttle commands, both in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    /// Steering command; positive steers left.
    pub steering: f32,
    /// Throttle command; negative brakes and reverses.
    pub throttle: f32,
}

/// Multi-layer perceptron with tanh activation on every layer.
///
/// The topology is fixed at construction and never resized; breeding only
/// ever combines brains built from the same layer sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Layer>,
}

impl Brain {
    /// Creates a new brain with random weights.
    ///
    /// `layer_sizes` lists the input width, every hidden width and the output
    /// width, so it needs at least two entries.
    ///
    /// # Panics
    ///
    /// Panics if `layer_sizes` has fewer than two entries.
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Self {
        assert!(layer_sizes.len() >= 2, "a brain needs an input and an output layer");

        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new_random(pair[0], pair[1], rng))
            .collect();

        Self { layers }
    }

    /// Runs a forward pass through all layers.
    ///
    /// The raw inputs are squashed with tanh before the first layer.
    #[inline]
    pub fn predict(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.mapv(f32::tanh);

        for layer in &self.layers {
            output = layer.forward(&output);
        }

        output
    }

    /// Runs a forward pass and reads the two control outputs.
    pub fn command(&self, inputs: &Array1<f32>) -> Command {
        let output = self.predict(inputs);
        Command {
            steering: output[0],
            throttle: output[1],
        }
    }

    /// Creates a child brain by per-parameter crossover with mutation.
    ///
    /// Every weight and bias independently becomes a fresh random value with
    /// probability `mutation_rate`; otherwise it is copied from a parent
    /// picked by a fair coin flip.
    pub fn merge<R: Rng + ?Sized>(
        parent1: &Brain,
        parent2: &Brain,
        mutation_rate: f32,
        rng: &mut R,
    ) -> Self {
        debug_assert_eq!(parent1.layer_sizes(), parent2.layer_sizes());

        let layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(layer1, layer2)| Layer::merge(layer1, layer2, mutation_rate, rng))
            .collect();

        Self { layers }
    }

    /// Layer dimensions, input first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.layers.first().map(Layer::input_size).into_iter().collect();
        sizes.extend(self.layers.iter().map(Layer::output_size));
        sizes
    }

    /// Flattens all weights and biases into a single vector.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::new();

        for layer in &self.layers {
            flat.extend(layer.weights.iter().copied());
            flat.push(layer.bias);
        }

        flat
    }
}
