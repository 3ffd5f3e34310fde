use crate::{Error, Result};
use candle_core::Tensor;
use candle_nn::{AdamW, Optimizer, VarMap};
use std::fmt::Debug;

/// AdamW bound to the vars of a `VarMap`, with a global-norm gradient check
/// on every step and optional gradient clipping.
///
/// The varmap's vars are exactly the trainable set; no parameter is stepped
/// outside of it and no tracked parameter escapes the step.
pub struct OptimizerWithGradCheck {
    pub optimizer: AdamW,
    pub max_grad_norm: Option<f32>,
    pub varmap: VarMap,
}

impl Debug for OptimizerWithGradCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizerWithGradCheck")
            .field("optimizer", &self.optimizer)
            .field("max_grad_norm", &self.max_grad_norm)
            .finish()
    }
}

impl OptimizerWithGradCheck {
    pub fn new(optimizer: AdamW, max_grad_norm: Option<f32>, varmap: VarMap) -> Self {
        Self {
            optimizer,
            max_grad_norm,
            varmap,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    /// Backpropagates the scalar loss and applies one optimizer step over
    /// every tracked parameter. A non-finite gradient norm aborts before the
    /// step so divergence surfaces as an error instead of a silent skip.
    pub fn backward_step(&mut self, loss: &Tensor) -> Result<()> {
        let mut grad_store = loss.backward()?;
        let all_vars = self.varmap.all_vars();
        let mut total_norm_squared = 0f32;
        for var in all_vars.iter() {
            if let Some(grad) = grad_store.get_id(var.id()) {
                total_norm_squared += grad.sqr()?.sum_all()?.to_scalar::<f32>()?;
            }
        }
        let total_norm = total_norm_squared.sqrt();
        if !total_norm.is_finite() {
            return Err(Error::NonFinite {
                what: "gradient norm",
                value: total_norm,
            });
        }
        if let Some(max_norm) = self.max_grad_norm {
            if total_norm > max_norm {
                let clip_coef = max_norm / (total_norm + 1e-6);
                for var in all_vars.iter() {
                    if let Some(grad) = grad_store.get_id(var.id()) {
                        let clipped = (grad * clip_coef as f64)?;
                        grad_store.insert(var.as_tensor(), clipped);
                    }
                }
            }
        }
        self.optimizer.step(&grad_store)?;
        Ok(())
    }
}
