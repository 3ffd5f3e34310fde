pub mod mlp_policy;

pub use mlp_policy::{MlpPolicy, PolicyConfig};

use crate::{Metrics, Result};
use candle_core::Tensor;
use std::path::Path;

/// The single contract a policy exposes to its pipeline: query an action
/// (sampled or deterministic mean), take one supervised gradient step, and
/// persist/restore the trainable parameters.
pub trait Policy {
    /// Samples one action per observation from the action distribution.
    /// Accepts a single observation `[ob_dim]` (treated as a batch of one)
    /// or a batch `[n, ob_dim]`; the output keeps the input's rank.
    fn act(&self, observation: &Tensor) -> Result<Tensor>;

    /// Deterministic query mode: returns the distribution mean, bypassing
    /// sampling. Reproducible for fixed parameters.
    fn act_mean(&self, observation: &Tensor) -> Result<Tensor>;

    /// One gradient step over exactly the given batch of expert pairs.
    /// Returns the reported metrics, at minimum "Training Loss".
    fn update(&mut self, observations: &Tensor, expert_actions: &Tensor) -> Result<Metrics>;

    fn save(&self, path: &Path) -> Result<()>;

    fn load(&mut self, path: &Path) -> Result<()>;
}
