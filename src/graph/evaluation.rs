// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for evaluating a [`SizingGraph`] at a design point.

use std::sync::Arc;

use crate::record::{DesignVector, EvaluationRecord, Partials};
use crate::{Component, Error, Jacobian, SizingGraph};

impl SizingGraph {
    /// Evaluates all components at the given design point, in execution
    /// order.
    ///
    /// Every declared design variable needs a finite value in `design`, and
    /// `design` may not contain anything else.  The evaluation stops at the
    /// first component that fails, and the error is tagged with the name of
    /// that component.
    pub fn evaluate(&self, design: &DesignVector) -> Result<EvaluationRecord, Error> {
        let mut unknown = design
            .keys()
            .filter(|name| !self.is_design_variable(name))
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(Error::unknown_variable(format!(
                "Not design variables of the graph: {:?}",
                unknown
            ))
            .with_variable(unknown[0].as_str()));
        }

        let mut values = vec![0.0; self.layout.variables.len()];
        for (slot, variable) in self.design_variables.iter().enumerate() {
            let value = *design.get(variable.name).ok_or_else(|| {
                Error::missing_variable(format!(
                    "No value given for design variable {}.",
                    variable.name
                ))
                .with_variable(variable.name)
            })?;
            if !value.is_finite() {
                return Err(
                    Error::domain(format!("Design variable has a non-finite value: {value}."))
                        .with_variable(variable.name),
                );
            }
            values[slot] = value;
        }

        let mut partials = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let node = &self.graph[step.node];
            let inputs = step.inputs.iter().map(|&i| values[i]).collect::<Vec<_>>();

            let linearization = node
                .linearize(&inputs, self.config.complex_step)
                .map_err(|e| e.in_component(node.name()))?;
            tracing::trace!("Evaluated {}: {:?}", node.name(), linearization.values);

            for (&slot, &value) in step.outputs.iter().zip(&linearization.values) {
                values[slot] = value;
            }
            partials.push(Partials {
                component: node.name().to_string(),
                inputs: node.inputs().to_vec(),
                outputs: node.outputs().to_vec(),
                jacobian: linearization.jacobian,
            });
        }

        let totals = self.propagate_totals(&partials);
        tracing::debug!(
            "Evaluated {} components at a design point with {} variables.",
            partials.len(),
            self.design_variables.len()
        );

        Ok(EvaluationRecord::new(
            Arc::clone(&self.layout),
            values,
            partials,
            totals,
        ))
    }

    /// Chains the component Jacobians in execution order, to get the
    /// derivatives of every variable with respect to every design variable.
    fn propagate_totals(&self, partials: &[Partials]) -> Jacobian {
        let n_design = self.layout.n_design;
        let mut totals = Jacobian::zeros(self.layout.variables.len(), n_design);
        for j in 0..n_design {
            totals.set(j, j, 1.0);
        }

        for (step, partial) in self.steps.iter().zip(partials) {
            for (k, &output) in step.outputs.iter().enumerate() {
                for j in 0..n_design {
                    let total = step
                        .inputs
                        .iter()
                        .enumerate()
                        .map(|(i, &input)| partial.jacobian.get(k, i) * totals.get(input, j))
                        .sum();
                    totals.set(output, j, total);
                }
            }
        }

        totals
    }
}
