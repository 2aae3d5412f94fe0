// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the traits that need to be implemented by the types
//! that represent a component of a sizing graph.

use crate::{complex_step::Linearization, Error, Scalar, Variable};

/**
This trait needs to be implemented by the type that represents a component.

A component is a pure relation from its declared inputs to its declared
outputs.  The relation is written once, generically over [`Scalar`], and is
evaluated both with real numbers for the values and with complex numbers for
the partial derivatives.

The slices passed to and returned from [`compute`][Component::compute] are in
the same order as the [`inputs`][Component::inputs] and
[`outputs`][Component::outputs] declarations.

<details>
<summary>Example implementation:</summary>

```
use multirotor_sizing::{checked_div, Component, Error, Scalar, Unit, Variable};

struct Density;

const INPUTS: &[Variable] = &[
    Variable::new("mass", Unit::Kilogram),
    Variable::new("volume", Unit::Dimensionless),
];
const OUTPUTS: &[Variable] = &[Variable::new("density", Unit::KilogramPerCubicMeter)];

impl Component for Density {
    fn name(&self) -> &str {
        "Density"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [mass, volume] = multirotor_sizing::unpack(self, inputs)?;
        Ok(vec![checked_div(mass, volume, "density")?])
    }
}
```

</details>
*/
pub trait Component {
    /// Returns the name of the component.  Names must be unique within a
    /// graph.
    fn name(&self) -> &str;
    /// Returns the declared inputs of the component.
    fn inputs(&self) -> &[Variable];
    /// Returns the declared outputs of the component.
    fn outputs(&self) -> &[Variable];
    /// Evaluates the relation of the component.
    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error>
    where
        Self: Sized;
}

/// The object-safe view of a [`Component`], that the graph stores and
/// evaluates.
///
/// It is implemented for all types that implement [`Component`] and can be
/// shared between threads.
pub trait Node: Component + Send + Sync {
    /// Returns the output values and the partial derivatives of all outputs
    /// with respect to all inputs, at the given input values.
    fn linearize(&self, inputs: &[f64], step: f64) -> Result<Linearization, Error>;
}

impl<C: Component + Send + Sync> Node for C {
    fn linearize(&self, inputs: &[f64], step: f64) -> Result<Linearization, Error> {
        crate::complex_step::linearize(self, inputs, step)
    }
}

/// Converts the input slice of a component into a fixed-size array, so that
/// relations can destructure their inputs by name.
pub fn unpack<C, T, const N: usize>(component: &C, inputs: &[T]) -> Result<[T; N], Error>
where
    C: Component + ?Sized,
    T: Scalar,
{
    <[T; N]>::try_from(inputs).map_err(|_| {
        Error::internal(format!(
            "{} expects {} inputs, got {}.",
            component.name(),
            N,
            inputs.len()
        ))
    })
}
