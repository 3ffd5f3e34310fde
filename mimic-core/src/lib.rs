pub mod distributions;
pub mod error;
pub mod metrics;
pub mod nn;
pub mod optimizer;
pub mod policies;
pub mod tensors;

pub use error::{Error, Result};
pub use metrics::{Metrics, TRAINING_LOSS};
pub use policies::{MlpPolicy, Policy, PolicyConfig};
