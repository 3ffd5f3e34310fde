use crate::Result;
use candle_nn::{Sequential, VarBuilder, linear, seq};

/// Builds a feed-forward approximator: `n_layers` blocks of linear + tanh,
/// closed by a linear projection to `output_size` with no activation. With
/// `n_layers == 0` this degenerates to a single affine map.
///
/// Layer variables are registered in the builder's backing store under
/// `"{prefix}{idx}"`.
pub fn build_mlp(
    input_size: usize,
    output_size: usize,
    n_layers: usize,
    hidden_size: usize,
    vb: &VarBuilder,
    prefix: &str,
) -> Result<Sequential> {
    let mut last_dim = input_size;
    let mut nn = seq();
    for layer_idx in 0..n_layers {
        let layer_pp = format!("{prefix}{layer_idx}");
        nn = nn
            .add(linear(last_dim, hidden_size, vb.pp(layer_pp))?)
            .add_fn(|xs| xs.tanh());
        last_dim = hidden_size;
    }
    let layer_pp = format!("{prefix}{n_layers}");
    nn = nn.add(linear(last_dim, output_size, vb.pp(layer_pp))?);
    Ok(nn)
}
