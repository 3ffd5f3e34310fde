use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use candle_nn::{Module, VarBuilder, VarMap};
use mimic_core::nn::build_mlp;

const IN: usize = 3;
const OUT: usize = 2;

fn forward_dims(n_layers: usize, batch: usize) -> Result<Vec<usize>> {
    let device = Device::Cpu;
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let mlp = build_mlp(IN, OUT, n_layers, 8, &vb, "net.")?;
    let input = Tensor::randn(0f32, 1f32, (batch, IN), &device)?;
    Ok(mlp.forward(&input)?.dims().to_vec())
}

#[test]
fn output_shape_matches_batch_and_action_dims() -> Result<()> {
    for n_layers in [0, 1, 3] {
        for batch in [1, 7] {
            assert_eq!(forward_dims(n_layers, batch)?, vec![batch, OUT]);
        }
    }
    Ok(())
}

#[test]
fn registers_one_weight_and_bias_per_layer() -> Result<()> {
    for n_layers in [0, 2] {
        let device = Device::Cpu;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        build_mlp(IN, OUT, n_layers, 8, &vb, "net.")?;
        assert_eq!(varmap.all_vars().len(), 2 * (n_layers + 1));
    }
    Ok(())
}

#[test]
fn hidden_activation_is_bounded_and_saturating() -> Result<()> {
    let device = Device::Cpu;
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let mlp = build_mlp(IN, OUT, 1, 8, &vb, "net.")?;
    // tanh saturates, so even an enormous input leaves the output within the
    // reach of the final affine layer; an unbounded activation would scale
    // the output with the input.
    let huge = Tensor::full(1e6f32, (1, IN), &device)?;
    let out = mlp.forward(&huge)?.abs()?.sum_all()?.to_scalar::<f32>()?;
    assert!(
        out.is_finite() && out < 100.,
        "hidden activation is not bounded: {out}"
    );
    Ok(())
}

#[test]
fn zero_hidden_layers_is_a_single_affine_map() -> Result<()> {
    let device = Device::Cpu;
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let mlp = build_mlp(IN, OUT, 0, 8, &vb, "net.")?;
    // An affine map is additive up to the bias: f(a + b) + f(0) == f(a) + f(b).
    let a = Tensor::randn(0f32, 1f32, (1, IN), &device)?;
    let b = Tensor::randn(0f32, 1f32, (1, IN), &device)?;
    let zero = Tensor::zeros((1, IN), DType::F32, &device)?;
    let lhs = mlp.forward(&a.add(&b)?)?.add(&mlp.forward(&zero)?)?;
    let rhs = mlp.forward(&a)?.add(&mlp.forward(&b)?)?;
    let diff = lhs.sub(&rhs)?.abs()?.sum_all()?.to_scalar::<f32>()?;
    assert!(diff < 1e-4, "affine additivity violated: {diff}");
    Ok(())
}
