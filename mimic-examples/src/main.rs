//! Behavior cloning against a synthetic linear expert. The training loop
//! lives here, on the caller side; the policy only exposes per-batch updates.
//! Metric lines are printed in the `MetricName: value` shape that external
//! log-table tooling scrapes.

use anyhow::Result;
use candle_core::{Device, Tensor};
use mimic_core::policies::{MlpPolicy, Policy, PolicyConfig};

const OB_DIM: usize = 4;
const AC_DIM: usize = 2;
const DATASET_SIZE: usize = 256;
const TRAIN_STEPS: usize = 500;

fn main() -> Result<()> {
    let device = Device::Cpu;

    // The expert is a fixed linear map from observations to actions.
    let expert = Tensor::from_slice(
        &[0.5f32, -1.0, 1.5, 0.25, -0.75, 2.0, 0.0, 1.0],
        (OB_DIM, AC_DIM),
        &device,
    )?;
    let observations = Tensor::randn(0f32, 1f32, (DATASET_SIZE, OB_DIM), &device)?;
    let expert_actions = observations.matmul(&expert)?;

    let config = PolicyConfig {
        ac_dim: AC_DIM,
        ob_dim: OB_DIM,
        learning_rate: 1e-3,
        ..Default::default()
    };
    let mut policy = MlpPolicy::new(config, &device)?;

    for step in 0..TRAIN_STEPS {
        let metrics = policy.update(&observations, &expert_actions)?;
        if step % 50 == 0 {
            print!("{metrics}");
        }
    }

    // Reproducible evaluation goes through the deterministic mean.
    let eval_mse = policy
        .act_mean(&observations)?
        .sub(&expert_actions)?
        .sqr()?
        .mean_all()?
        .to_scalar::<f32>()?;
    println!("Eval MSE: {eval_mse}");

    let checkpoint = std::env::temp_dir().join("mimic_bc_linear_expert.safetensors");
    policy.save(&checkpoint)?;
    println!("checkpoint written to {}", checkpoint.display());
    Ok(())
}
