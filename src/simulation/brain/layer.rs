//! Fully connected layer with a single shared bias.

use ndarray::{Array1, Array2};
use rand::Rng;

/// Draws a gene value from the initialization range `[-1, 1]`.
pub(crate) fn random_gene<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-1.0..=1.0)
}

/// Picks a child gene: a fresh random value with probability `mutation_rate`,
/// otherwise one of the two parent genes with equal probability.
fn inherit_gene<R: Rng + ?Sized>(a: f32, b: f32, mutation_rate: f32, rng: &mut R) -> f32 {
    if rng.random::<f32>() < mutation_rate {
        random_gene(rng)
    } else if rng.random_bool(0.5) {
        a
    } else {
        b
    }
}

/// A single layer of the controller network.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias added to every output of the layer.
    pub bias: f32,
}

impl Layer {
    /// Creates a new layer with weights and bias drawn uniformly from `[-1, 1]`.
    pub fn new_random<R: Rng + ?Sized>(input_size: usize, output_size: usize, rng: &mut R) -> Self {
        let weights = Array2::from_shape_fn((output_size, input_size), |_| random_gene(rng));
        let bias = random_gene(rng);
        Self { weights, bias }
    }

    /// Performs forward pass with tanh activation.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += self.bias;
        output.mapv_inplace(f32::tanh);
        output
    }

    /// Builds a child layer gene by gene from two parents of the same shape.
    pub fn merge<R: Rng + ?Sized>(
        parent1: &Layer,
        parent2: &Layer,
        mutation_rate: f32,
        rng: &mut R,
    ) -> Self {
        let bias = inherit_gene(parent1.bias, parent2.bias, mutation_rate, rng);
        let weights = Array2::from_shape_fn(parent1.weights.dim(), |idx| {
            inherit_gene(parent1.weights[idx], parent2.weights[idx], mutation_rate, rng)
        });
        Self { weights, bias }
    }

    /// Number of inputs the layer consumes.
    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of outputs the layer produces.
    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }
}
