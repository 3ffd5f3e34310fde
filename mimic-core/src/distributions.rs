use crate::Result;
use candle_core::{Device, Tensor};
use candle_nn::{Module, Sequential};

/// A diagonal Gaussian over the action space. The mean comes from a
/// feed-forward net, the standard deviation from a single learned `log_std`
/// vector shared across observations. Keeping the parameter in log-space
/// guarantees `exp(log_std)` stays strictly positive under unconstrained
/// gradient updates.
pub struct DiagGaussianDistribution {
    mu_net: Sequential,
    log_std: Tensor,
    device: Device,
}

impl DiagGaussianDistribution {
    pub fn new(mu_net: Sequential, log_std: Tensor, device: Device) -> Self {
        Self {
            mu_net,
            log_std,
            device,
        }
    }

    /// Distribution mean for a batch of observations, shape `[n, ac_dim]`.
    pub fn mean(&self, observations: &Tensor) -> Result<Tensor> {
        Ok(self.mu_net.forward(observations)?)
    }

    /// Reparameterized sample: `mean + exp(log_std) * eps` with
    /// `eps ~ N(0, 1)` drawn independently per element. The gradient path
    /// through both the mean net and `log_std` stays intact.
    pub fn sample(&self, observations: &Tensor) -> Result<Tensor> {
        let mean = self.mu_net.forward(observations)?;
        let std = self.log_std.exp()?;
        let noise = Tensor::randn(0f32, 1f32, mean.shape(), &self.device)?;
        let action = mean.add(&noise.broadcast_mul(&std)?)?;
        Ok(action)
    }

    pub fn std(&self) -> Result<Tensor> {
        Ok(self.log_std.exp()?)
    }

    pub fn log_std(&self) -> &Tensor {
        &self.log_std
    }
}
