// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The result of one evaluation of a [`SizingGraph`][crate::SizingGraph].

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::VariableLayout;
use crate::{Error, Jacobian, Unit, Variable};

/// The values of the design variables for one evaluation, keyed by name.
pub type DesignVector = HashMap<String, f64>;

/// The partial derivatives of one component's outputs with respect to its
/// inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct Partials {
    pub(crate) component: String,
    pub(crate) inputs: Vec<Variable>,
    pub(crate) outputs: Vec<Variable>,
    pub(crate) jacobian: Jacobian,
}

impl Partials {
    /// Returns the name of the component.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the inputs of the component, in column order.
    pub fn inputs(&self) -> &[Variable] {
        &self.inputs
    }

    /// Returns the outputs of the component, in row order.
    pub fn outputs(&self) -> &[Variable] {
        &self.outputs
    }

    /// Returns the Jacobian of the component.
    pub fn jacobian(&self) -> &Jacobian {
        &self.jacobian
    }

    /// Returns the partial derivative of output `of` with respect to input
    /// `wrt`.
    pub fn get(&self, of: &str, wrt: &str) -> Result<f64, Error> {
        let i = position(&self.outputs, of).ok_or_else(|| {
            Error::variable_not_found(format!("{} has no output {of}.", self.component))
        })?;
        let j = position(&self.inputs, wrt).ok_or_else(|| {
            Error::variable_not_found(format!("{} has no input {wrt}.", self.component))
        })?;
        Ok(self.jacobian.get(i, j))
    }
}

fn position(variables: &[Variable], name: &str) -> Option<usize> {
    variables.iter().position(|v| v.name == name)
}

/// One complete, immutable assignment of every variable of a graph, together
/// with the derivatives of every component.
///
/// Besides the per-component partials, the record holds the total derivatives
/// of every variable with respect to every design variable, obtained by
/// chaining the component Jacobians in execution order.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationRecord {
    layout: Arc<VariableLayout>,
    values: Vec<f64>,
    partials: Vec<Partials>,
    totals: Jacobian,
}

impl EvaluationRecord {
    pub(crate) fn new(
        layout: Arc<VariableLayout>,
        values: Vec<f64>,
        partials: Vec<Partials>,
        totals: Jacobian,
    ) -> Self {
        Self {
            layout,
            values,
            partials,
            totals,
        }
    }

    fn index(&self, name: &str) -> Result<usize, Error> {
        self.layout
            .index(name)
            .ok_or_else(|| Error::variable_not_found(format!("Variable {name} not found.")))
    }

    /// Returns the value of the design or computed variable `name`.
    pub fn value(&self, name: &str) -> Result<f64, Error> {
        self.index(name).map(|i| self.values[i])
    }

    /// Returns the unit of the design or computed variable `name`.
    pub fn unit(&self, name: &str) -> Result<Unit, Error> {
        self.index(name).map(|i| self.layout.variables[i].unit)
    }

    /// Returns an iterator over all variables and their values.
    ///
    /// Design variables come first, followed by the computed variables in
    /// execution order.
    pub fn variables(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.layout
            .variables
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Returns the design variables, in declaration order.
    pub fn design_variables(&self) -> &[Variable] {
        &self.layout.variables[..self.layout.n_design]
    }

    /// Returns the partials of every component, in execution order.
    pub fn all_partials(&self) -> &[Partials] {
        &self.partials
    }

    /// Returns the partials of the component with the given name.
    pub fn partials(&self, component: &str) -> Result<&Partials, Error> {
        self.partials
            .iter()
            .find(|p| p.component == component)
            .ok_or_else(|| Error::component_not_found(format!("Component {component} not found.")))
    }

    /// Returns the partial derivative of output `of` of `component` with
    /// respect to its input `wrt`.
    pub fn partial(&self, component: &str, of: &str, wrt: &str) -> Result<f64, Error> {
        self.partials(component)?.get(of, wrt)
    }

    /// Returns the total derivative of variable `of` with respect to design
    /// variable `wrt`.
    pub fn total_derivative(&self, of: &str, wrt: &str) -> Result<f64, Error> {
        let i = self.index(of)?;
        let j = self.design_index(wrt)?;
        Ok(self.totals.get(i, j))
    }

    /// Returns the total derivatives of the variables `of` with respect to
    /// the design variables `wrt`, as a matrix with one row per variable and
    /// one column per design variable.
    pub fn total_jacobian(&self, of: &[&str], wrt: &[&str]) -> Result<Jacobian, Error> {
        let rows = of
            .iter()
            .map(|name| self.index(name))
            .collect::<Result<Vec<_>, _>>()?;
        let columns = wrt
            .iter()
            .map(|name| self.design_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut jacobian = Jacobian::zeros(rows.len(), columns.len());
        for (i, &row) in rows.iter().enumerate() {
            for (j, &column) in columns.iter().enumerate() {
                jacobian.set(i, j, self.totals.get(row, column));
            }
        }
        Ok(jacobian)
    }

    fn design_index(&self, name: &str) -> Result<usize, Error> {
        match self.layout.index(name) {
            Some(j) if j < self.layout.n_design => Ok(j),
            _ => Err(Error::variable_not_found(format!(
                "{name} is not a design variable."
            ))),
        }
    }
}
