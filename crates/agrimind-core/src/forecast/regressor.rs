//! Single-hidden-layer regressor mapping a series index to a value.
//!
//! Architecture: 1 input -> `hidden` ReLU units -> 1 linear output. Trained
//! full-batch with Adam on mean squared error for a fixed number of epochs.

use ndarray::{Array1, Array2, Axis};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::consts::{ADAM_BETA1, ADAM_BETA2, ADAM_EPSILON};
use crate::error::{AgriError, Result};

#[derive(Clone, Debug)]
pub struct Regressor {
    w1: Array1<f64>,
    b1: Array1<f64>,
    w2: Array1<f64>,
    b2: f64,
}

/// Gradients of the loss with respect to every parameter.
struct Gradients {
    w1: Array1<f64>,
    b1: Array1<f64>,
    w2: Array1<f64>,
    b2: f64,
}

/// Adam moment estimates, one slot per parameter tensor.
struct AdamState {
    step: i32,
    m: Gradients,
    v: Gradients,
}

impl Gradients {
    fn zeros(hidden: usize) -> Self {
        Self {
            w1: Array1::zeros(hidden),
            b1: Array1::zeros(hidden),
            w2: Array1::zeros(hidden),
            b2: 0.0,
        }
    }
}

impl Regressor {
    /// Glorot-uniform weights from a seeded generator, zero biases.
    pub fn new(hidden: usize, seed: u64) -> Self {
        let hidden = hidden.max(1);
        let mut rng = StdRng::seed_from_u64(seed);
        // fan_in + fan_out is hidden + 1 for both layers.
        let limit = (6.0 / (hidden as f64 + 1.0)).sqrt();
        let glorot = Uniform::new_inclusive(-limit, limit);
        let w1 = Array1::from_shape_fn(hidden, |_| glorot.sample(&mut rng));
        let w2 = Array1::from_shape_fn(hidden, |_| glorot.sample(&mut rng));
        Self {
            w1,
            b1: Array1::zeros(hidden),
            w2,
            b2: 0.0,
        }
    }

    pub fn hidden_units(&self) -> usize {
        self.w1.len()
    }

    /// Pre-activations of the hidden layer, shape (n, hidden).
    fn hidden_pre(&self, xs: &Array1<f64>) -> Array2<f64> {
        Array2::from_shape_fn((xs.len(), self.w1.len()), |(i, j)| {
            xs[i] * self.w1[j] + self.b1[j]
        })
    }

    pub fn predict(&self, xs: &Array1<f64>) -> Array1<f64> {
        let activated = self.hidden_pre(xs).mapv(relu);
        activated.dot(&self.w2) + self.b2
    }

    /// Mean squared error over the batch.
    pub fn loss(&self, xs: &Array1<f64>, ys: &Array1<f64>) -> f64 {
        let residual = self.predict(xs) - ys;
        residual.mapv(|r| r * r).mean().unwrap_or(0.0)
    }

    fn gradients(&self, xs: &Array1<f64>, ys: &Array1<f64>) -> (f64, Gradients) {
        let n = xs.len().max(1) as f64;
        let pre = self.hidden_pre(xs);
        let activated = pre.mapv(relu);
        let output = activated.dot(&self.w2) + self.b2;
        let residual = &output - ys;
        let loss = residual.mapv(|r| r * r).sum() / n;

        let d_out = residual.mapv(|r| 2.0 * r / n);
        let w2 = activated.t().dot(&d_out);
        let b2 = d_out.sum();

        // dL/dz for the hidden layer: outer(d_out, w2) masked by ReLU.
        let mut d_pre = Array2::from_shape_fn(pre.dim(), |(i, j)| d_out[i] * self.w2[j]);
        d_pre.zip_mut_with(&pre, |g, &z| {
            if z <= 0.0 {
                *g = 0.0;
            }
        });
        let w1 = d_pre.t().dot(xs);
        let b1 = d_pre.sum_axis(Axis(0));

        (loss, Gradients { w1, b1, w2, b2 })
    }

    /// Train from the current weights for exactly `epochs` full-batch steps.
    ///
    /// `on_epoch` is called after every step with the number of completed
    /// epochs. A non-finite loss or parameter aborts with `NumericFailure`.
    pub fn fit(
        &mut self,
        xs: &Array1<f64>,
        ys: &Array1<f64>,
        epochs: usize,
        learning_rate: f64,
        mut on_epoch: impl FnMut(usize, f64),
    ) -> Result<f64> {
        if xs.len() != ys.len() || xs.is_empty() {
            return Err(AgriError::InsufficientData {
                required: 1,
                available: xs.len().min(ys.len()),
            });
        }

        let hidden = self.hidden_units();
        let mut adam = AdamState {
            step: 0,
            m: Gradients::zeros(hidden),
            v: Gradients::zeros(hidden),
        };

        let mut last_loss = f64::NAN;
        for epoch in 0..epochs {
            let (loss, grads) = self.gradients(xs, ys);
            if !loss.is_finite() {
                return Err(AgriError::NumericFailure(format!(
                    "loss diverged at epoch {epoch}"
                )));
            }
            self.adam_step(&mut adam, &grads, learning_rate);
            if !self.is_finite() {
                return Err(AgriError::NumericFailure(format!(
                    "non-finite weights after epoch {epoch}"
                )));
            }
            last_loss = loss;
            on_epoch(epoch + 1, loss);
        }

        if epochs == 0 {
            last_loss = self.loss(xs, ys);
        }
        Ok(last_loss)
    }

    fn adam_step(&mut self, adam: &mut AdamState, grads: &Gradients, lr: f64) {
        adam.step += 1;
        let c1 = 1.0 - ADAM_BETA1.powi(adam.step);
        let c2 = 1.0 - ADAM_BETA2.powi(adam.step);

        let update = |param: &mut f64, g: f64, m: &mut f64, v: &mut f64| {
            *m = ADAM_BETA1 * *m + (1.0 - ADAM_BETA1) * g;
            *v = ADAM_BETA2 * *v + (1.0 - ADAM_BETA2) * g * g;
            let m_hat = *m / c1;
            let v_hat = *v / c2;
            *param -= lr * m_hat / (v_hat.sqrt() + ADAM_EPSILON);
        };

        for j in 0..self.w1.len() {
            update(&mut self.w1[j], grads.w1[j], &mut adam.m.w1[j], &mut adam.v.w1[j]);
            update(&mut self.b1[j], grads.b1[j], &mut adam.m.b1[j], &mut adam.v.b1[j]);
            update(&mut self.w2[j], grads.w2[j], &mut adam.m.w2[j], &mut adam.v.w2[j]);
        }
        update(&mut self.b2, grads.b2, &mut adam.m.b2, &mut adam.v.b2);
    }

    fn is_finite(&self) -> bool {
        self.b2.is_finite()
            && self.w1.iter().all(|v| v.is_finite())
            && self.b1.iter().all(|v| v.is_finite())
            && self.w2.iter().all(|v| v.is_finite())
    }
}

#[inline]
fn relu(z: f64) -> f64 {
    z.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_weights() {
        let a = Regressor::new(8, 7);
        let b = Regressor::new(8, 7);
        assert_eq!(a.w1, b.w1);
        assert_eq!(a.w2, b.w2);
    }

    #[test]
    fn test_different_seed_different_weights() {
        let a = Regressor::new(8, 7);
        let b = Regressor::new(8, 8);
        assert_ne!(a.w1, b.w1);
    }

    #[test]
    fn test_init_within_glorot_limit() {
        let r = Regressor::new(8, 42);
        let limit = (6.0f64 / 9.0).sqrt();
        assert!(r.w1.iter().chain(r.w2.iter()).all(|w| w.abs() <= limit));
    }

    #[test]
    fn test_fit_reduces_loss_on_line() {
        let xs = Array1::from_vec((0..6).map(|i| i as f64).collect());
        let ys = xs.mapv(|x| 2.0 * x + 1.0);
        let mut r = Regressor::new(8, 3);
        let before = r.loss(&xs, &ys);
        let after = r.fit(&xs, &ys, 200, 0.05, |_, _| {}).unwrap();
        assert!(after < before, "loss {after} should drop below {before}");
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let xs = Array1::from_vec(vec![0.0, 1.0, 2.0]);
        let ys = Array1::from_vec(vec![1.0, 3.0, 2.0]);
        let r = Regressor::new(4, 11);
        let (_, grads) = r.gradients(&xs, &ys);

        let h = 1e-6;
        let mut plus = r.clone();
        plus.b2 += h;
        let mut minus = r.clone();
        minus.b2 -= h;
        let numeric = (plus.loss(&xs, &ys) - minus.loss(&xs, &ys)) / (2.0 * h);
        assert!((numeric - grads.b2).abs() < 1e-4);
    }
}
