// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `graph` modue.
//!
//! - the `TestComponent` type, which implements the `Component` trait with a
//!   simple polynomial relation.
//! - the `SizingGraphBuilder`, which can declaratively build sizing graph
//!   configurations for use in tests.

use crate::{Component, Error, Scalar, SizingGraph, SizingGraphConfig, Variable};

/// A component whose `k`-th output is `(k + 1) * sum(x_i^2) + 1`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestComponent {
    name: &'static str,
    inputs: Vec<Variable>,
    outputs: Vec<Variable>,
}

impl TestComponent {
    pub(crate) fn new(name: &'static str, inputs: Vec<Variable>, outputs: Vec<Variable>) -> Self {
        TestComponent {
            name,
            inputs,
            outputs,
        }
    }
}

impl Component for TestComponent {
    fn name(&self) -> &str {
        self.name
    }

    fn inputs(&self) -> &[Variable] {
        &self.inputs
    }

    fn outputs(&self) -> &[Variable] {
        &self.outputs
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        if inputs.len() != self.inputs.len() {
            return Err(Error::internal(format!(
                "{} expects {} inputs, got {}.",
                self.name,
                self.inputs.len(),
                inputs.len()
            )));
        }
        let sum_of_squares = inputs
            .iter()
            .fold(T::from_real(0.0), |acc, &x| acc + x * x);
        Ok((0..self.outputs.len())
            .map(|k| sum_of_squares * (k + 1) as f64 + 1.0)
            .collect())
    }
}

/// A builder for creating sizing graph configurations easily, for use in
/// tests.
pub(crate) struct SizingGraphBuilder {
    components: Vec<TestComponent>,
    design_variables: Vec<Variable>,
}

impl SizingGraphBuilder {
    /// Creates a new `SizingGraphBuilder`.
    pub(crate) fn new() -> Self {
        SizingGraphBuilder {
            components: Vec::new(),
            design_variables: Vec::new(),
        }
    }

    /// Declares a dimensionless design variable.
    pub(crate) fn design(&mut self, name: &'static str) -> &mut Self {
        self.design_variables.push(Variable::dimensionless(name));
        self
    }

    /// Adds a component with dimensionless inputs and outputs.
    pub(crate) fn component(
        &mut self,
        name: &'static str,
        inputs: &[&'static str],
        outputs: &[&'static str],
    ) -> &mut Self {
        self.components.push(TestComponent::new(
            name,
            inputs.iter().map(|&n| Variable::dimensionless(n)).collect(),
            outputs.iter().map(|&n| Variable::dimensionless(n)).collect(),
        ));
        self
    }

    /// Adds a component with the given inputs and outputs.
    pub(crate) fn component_with_units(
        &mut self,
        name: &'static str,
        inputs: &[Variable],
        outputs: &[Variable],
    ) -> &mut Self {
        self.components
            .push(TestComponent::new(name, inputs.to_vec(), outputs.to_vec()));
        self
    }

    /// Appends dimensionless inputs to every component with the given name.
    pub(crate) fn extend_inputs(&mut self, name: &str, inputs: &[&'static str]) -> &mut Self {
        for component in self.components.iter_mut().filter(|c| c.name == name) {
            component
                .inputs
                .extend(inputs.iter().map(|&n| Variable::dimensionless(n)));
        }
        self
    }

    /// Builds and returns the sizing graph from the components and design
    /// variables added to the builder.
    pub(crate) fn build(&self, config: Option<SizingGraphConfig>) -> Result<SizingGraph, Error> {
        SizingGraph::try_new(
            self.components
                .iter()
                .cloned()
                .map(|c| Box::new(c) as Box<dyn crate::Node>),
            self.design_variables.clone(),
            config.unwrap_or_default(),
        )
    }
}
