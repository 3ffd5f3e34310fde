use super::Policy;
use crate::distributions::DiagGaussianDistribution;
use crate::metrics::{Metrics, TRAINING_LOSS};
use crate::nn::build_mlp;
use crate::optimizer::OptimizerWithGradCheck;
use crate::tensors::TrainingLoss;
use crate::{Error, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{AdamW, Init, Optimizer, ParamsAdamW, VarBuilder, VarMap};
use std::path::Path;

/// Static configuration of an [`MlpPolicy`].
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub ac_dim: usize,
    pub ob_dim: usize,
    pub n_layers: usize,
    pub hidden_size: usize,
    pub learning_rate: f64,
    /// When false the policy is a frozen instantiation and `update` errors.
    pub training: bool,
    /// Reserved for an auxiliary value-estimation head. Accepted for
    /// forward compatibility, currently without effect.
    pub nn_baseline: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            ac_dim: 1,
            ob_dim: 1,
            n_layers: 2,
            hidden_size: 64,
            learning_rate: 1e-4,
            training: true,
            nn_baseline: false,
        }
    }
}

impl PolicyConfig {
    fn validate(&self) -> Result<()> {
        if self.ac_dim == 0 {
            return Err(Error::Config("ac_dim must be positive"));
        }
        if self.ob_dim == 0 {
            return Err(Error::Config("ob_dim must be positive"));
        }
        if self.n_layers > 0 && self.hidden_size == 0 {
            return Err(Error::Config("hidden_size must be positive when n_layers > 0"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.) {
            return Err(Error::Config("learning_rate must be positive"));
        }
        Ok(())
    }
}

/// A stochastic imitation policy: a tanh MLP mean net over observations plus
/// a learned `log_std` vector, trained by supervised regression against
/// expert actions. The optimizer tracks exactly the mean net's weights and
/// biases and `log_std`, all registered in one `VarMap`.
pub struct MlpPolicy {
    config: PolicyConfig,
    device: Device,
    distribution: DiagGaussianDistribution,
    optimizer: OptimizerWithGradCheck,
}

impl MlpPolicy {
    pub fn new(config: PolicyConfig, device: &Device) -> Result<Self> {
        config.validate()?;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, device);
        let log_std = vb.get_with_hints(config.ac_dim, "log_std", Init::Const(0.))?;
        let mean_net = build_mlp(
            config.ob_dim,
            config.ac_dim,
            config.n_layers,
            config.hidden_size,
            &vb,
            "mean_net.",
        )?;
        let distribution = DiagGaussianDistribution::new(mean_net, log_std, device.clone());
        let optimizer = AdamW::new(
            varmap.all_vars(),
            ParamsAdamW {
                lr: config.learning_rate,
                weight_decay: 0.0,
                ..Default::default()
            },
        )?;
        let optimizer = OptimizerWithGradCheck::new(optimizer, None, varmap);
        Ok(Self {
            config,
            device: device.clone(),
            distribution,
            optimizer,
        })
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn distribution(&self) -> &DiagGaussianDistribution {
        &self.distribution
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    /// Moves the observation to the policy's device and normalizes it to a
    /// `[n, ob_dim]` batch. Returns whether a batch dimension was added, so
    /// callers can squeeze their output back to the input's rank.
    fn batch_observations(&self, observation: &Tensor) -> Result<(Tensor, bool)> {
        let observation = observation.to_device(&self.device)?;
        let dims = observation.dims().to_vec();
        match dims.as_slice() {
            [ob_dim] if *ob_dim == self.config.ob_dim => Ok((observation.unsqueeze(0)?, true)),
            [_, ob_dim] if *ob_dim == self.config.ob_dim => Ok((observation, false)),
            dims => Err(Error::Shape {
                context: "observations",
                expected: format!("[{ob}] or [n, {ob}]", ob = self.config.ob_dim),
                got: format!("{dims:?}"),
            }),
        }
    }

    fn batch_actions(&self, actions: &Tensor) -> Result<Tensor> {
        let actions = actions.to_device(&self.device)?;
        let dims = actions.dims().to_vec();
        match dims.as_slice() {
            [ac_dim] if *ac_dim == self.config.ac_dim => Ok(actions.unsqueeze(0)?),
            [_, ac_dim] if *ac_dim == self.config.ac_dim => Ok(actions),
            dims => Err(Error::Shape {
                context: "expert actions",
                expected: format!("[{ac}] or [n, {ac}]", ac = self.config.ac_dim),
                got: format!("{dims:?}"),
            }),
        }
    }
}

impl Policy for MlpPolicy {
    fn act(&self, observation: &Tensor) -> Result<Tensor> {
        let (batch, added_batch_dim) = self.batch_observations(observation)?;
        let action = self.distribution.sample(&batch)?;
        if added_batch_dim {
            Ok(action.squeeze(0)?)
        } else {
            Ok(action)
        }
    }

    fn act_mean(&self, observation: &Tensor) -> Result<Tensor> {
        let (batch, added_batch_dim) = self.batch_observations(observation)?;
        let mean = self.distribution.mean(&batch)?;
        if added_batch_dim {
            Ok(mean.squeeze(0)?)
        } else {
            Ok(mean)
        }
    }

    fn update(&mut self, observations: &Tensor, expert_actions: &Tensor) -> Result<Metrics> {
        if !self.config.training {
            return Err(Error::Frozen);
        }
        let (observations, _) = self.batch_observations(observations)?;
        let expert_actions = self.batch_actions(expert_actions)?;
        let obs_batch = observations.dim(0)?;
        let act_batch = expert_actions.dim(0)?;
        if obs_batch != act_batch {
            return Err(Error::Shape {
                context: "batch sizes",
                expected: format!("expert action batch of {obs_batch}"),
                got: format!("{act_batch}"),
            });
        }
        let predicted = self.distribution.sample(&observations)?;
        let loss = TrainingLoss(predicted.sub(&expert_actions)?.sqr()?.mean_all()?);
        let loss_value = loss.to_scalar::<f32>()?;
        if !loss_value.is_finite() {
            return Err(Error::NonFinite {
                what: "training loss",
                value: loss_value,
            });
        }
        self.optimizer.backward_step(&loss)?;
        let mut metrics = Metrics::default();
        metrics.insert(TRAINING_LOSS, loss_value);
        Ok(metrics)
    }

    fn save(&self, path: &Path) -> Result<()> {
        Ok(self.optimizer.varmap.save(path)?)
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(Error::CheckpointNotFound {
                path: path.to_path_buf(),
            });
        }
        self.optimizer
            .varmap
            .load(path)
            .map_err(|source| Error::CheckpointLoad {
                path: path.to_path_buf(),
                source,
            })
    }
}
