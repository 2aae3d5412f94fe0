// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Complex-step differentiation of component relations.
//!
//! For an analytic relation `f`, `f(x + ih) = f(x) + ih f'(x) + O(h²)`, so
//! `Im(f(x + ih)) / h` is the derivative to machine precision, without the
//! subtractive cancellation of finite differences.  Each input is perturbed
//! in turn, and the relation is re-evaluated with complex arithmetic.

use num_complex::Complex64;

use crate::{Component, Error, Scalar};

/// A dense matrix of partial derivatives, stored in row-major order.
///
/// Rows correspond to outputs and columns to inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct Jacobian {
    n_outputs: usize,
    n_inputs: usize,
    entries: Vec<f64>,
}

impl Jacobian {
    /// Creates a new Jacobian with all entries set to zero.
    pub fn zeros(n_outputs: usize, n_inputs: usize) -> Self {
        Jacobian {
            n_outputs,
            n_inputs,
            entries: vec![0.0; n_outputs * n_inputs],
        }
    }

    /// Returns the number of rows.
    pub fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    /// Returns the number of columns.
    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    /// Gets the derivative of output `i` with respect to input `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries[i * self.n_inputs + j]
    }

    /// Sets the derivative of output `i` with respect to input `j`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.entries[i * self.n_inputs + j] = value;
    }

    /// Returns row `i`, the derivatives of output `i` with respect to all
    /// inputs.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.entries[i * self.n_inputs..(i + 1) * self.n_inputs]
    }
}

/// The values of a component's outputs at a point, together with their
/// partial derivatives.
#[derive(Clone, Debug, PartialEq)]
pub struct Linearization {
    pub values: Vec<f64>,
    pub jacobian: Jacobian,
}

/// Evaluates `component` at `inputs` and computes the partial derivatives of
/// all its outputs with respect to all its inputs.
///
/// Non-finite values or derivatives are reported as domain errors on the
/// output they were found in.
pub(crate) fn linearize<C: Component>(
    component: &C,
    inputs: &[f64],
    step: f64,
) -> Result<Linearization, Error> {
    let outputs = component.outputs();
    let values = checked_outputs(component, component.compute(inputs)?)?;

    for (output, value) in outputs.iter().zip(&values) {
        if !value.is_finite() {
            return Err(
                Error::domain(format!("Computed a non-finite value: {value}."))
                    .with_variable(output.name),
            );
        }
    }

    let mut jacobian = Jacobian::zeros(outputs.len(), inputs.len());
    let mut perturbed: Vec<Complex64> = inputs.iter().map(|&x| Complex64::from_real(x)).collect();

    for j in 0..inputs.len() {
        perturbed[j].im = step;
        let results = checked_outputs(component, component.compute(&perturbed)?)?;
        perturbed[j].im = 0.0;

        for (i, result) in results.iter().enumerate() {
            let derivative = result.im / step;
            if !derivative.is_finite() {
                return Err(Error::domain(format!(
                    "Computed a non-finite derivative with respect to {}.",
                    component.inputs()[j].name
                ))
                .with_variable(outputs[i].name));
            }
            jacobian.set(i, j, derivative);
        }
    }

    Ok(Linearization { values, jacobian })
}

fn checked_outputs<C: Component, T: Scalar>(component: &C, results: Vec<T>) -> Result<Vec<T>, Error> {
    if results.len() != component.outputs().len() {
        return Err(Error::internal(format!(
            "{} declares {} outputs, but computed {}.",
            component.name(),
            component.outputs().len(),
            results.len()
        )));
    }
    Ok(results)
}

/// Checks the complex-step derivatives of `component` at `inputs` against
/// central finite differences.
#[cfg(test)]
pub(crate) fn assert_matches_central_differences<C: Component>(component: &C, inputs: &[f64]) {
    let linearization = match linearize(component, inputs, crate::config::DEFAULT_COMPLEX_STEP) {
        Ok(linearization) => linearization,
        Err(e) => panic!("{} failed to linearize: {e}", component.name()),
    };

    for (j, &x) in inputs.iter().enumerate() {
        let h = 1e-6 * x.abs().max(1e-3);
        let mut forward = inputs.to_vec();
        forward[j] = x + h;
        let mut backward = inputs.to_vec();
        backward[j] = x - h;

        let (Ok(y_fwd), Ok(y_bwd)) = (component.compute(&forward), component.compute(&backward))
        else {
            panic!("{} failed to evaluate around its inputs", component.name());
        };

        for (i, value) in linearization.values.iter().enumerate() {
            let fd = (y_fwd[i] - y_bwd[i]) / (2.0 * h);
            let cs = linearization.jacobian.get(i, j);
            let tolerance = 1e-6 * cs.abs().max(fd.abs()) + 1e-12 * value.abs() / h;
            assert!(
                (cs - fd).abs() <= tolerance,
                "{}: d{}/d{}: complex step {cs}, central difference {fd}",
                component.name(),
                component.outputs()[i].name,
                component.inputs()[j].name,
            );
        }
    }
}
