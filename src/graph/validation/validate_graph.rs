// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating the acyclicity of a [`SizingGraph`] and the use of
//! its design variables.

use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;

use crate::{Component, Error};

use super::SizingGraphValidator;

impl SizingGraphValidator<'_> {
    /// Validates that there are no cycles in the graph.
    ///
    /// If a cycle is detected, an error is returned, that lists the
    /// components in the cycle.
    pub(super) fn validate_acyclicity(&self) -> Result<(), Error> {
        let mut finished = BTreeSet::new();
        for idx in self.sg.graph.node_indices() {
            if !finished.contains(&idx) {
                self.visit(idx, &mut vec![], &mut finished)?;
            }
        }
        Ok(())
    }

    fn visit(
        &self,
        node: NodeIndex,
        predecessors: &mut Vec<NodeIndex>,
        finished: &mut BTreeSet<NodeIndex>,
    ) -> Result<(), Error> {
        predecessors.push(node);
        for successor in self
            .sg
            .graph
            .neighbors_directed(node, petgraph::Direction::Outgoing)
        {
            if let Some(first_occurance) = predecessors.iter().position(|idx| *idx == successor) {
                return Err(Error::configuration(format!(
                    "Cycle detected: {} -> {}",
                    predecessors[first_occurance..]
                        .iter()
                        .map(|idx| self.sg.graph[*idx].name())
                        .collect::<Vec<_>>()
                        .join(" -> "),
                    self.sg.graph[successor].name()
                )));
            }
            if !finished.contains(&successor) {
                self.visit(successor, predecessors, finished)?;
            }
        }
        predecessors.pop();
        finished.insert(node);
        Ok(())
    }

    /// Validates that every design variable is consumed by at least one
    /// component.
    ///
    /// Unused design variables are only logged when the graph is configured
    /// to allow them.
    pub(super) fn validate_design_variables_used(&self) -> Result<(), Error> {
        let consumed = self
            .sg
            .graph
            .raw_nodes()
            .iter()
            .flat_map(|n| n.weight.inputs().iter().map(|v| v.name))
            .collect::<BTreeSet<_>>();

        let unused = self
            .sg
            .design_variables
            .iter()
            .map(|v| v.name)
            .filter(|name| !consumed.contains(name))
            .collect::<Vec<_>>();

        if unused.is_empty() {
            return Ok(());
        }
        if !self.sg.config.allow_unused_design_variables {
            return Err(Error::configuration(format!(
                "Design variables {:?} are not consumed by any component.",
                unused
            )));
        }
        tracing::warn!(
            "Design variables {:?} are not consumed by any component and will be ignored.",
            unused
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::test_utils::SizingGraphBuilder;
    use crate::{Error, SizingGraphConfig};

    fn builder() -> SizingGraphBuilder {
        let mut builder = SizingGraphBuilder::new();
        builder
            .design("a")
            .component("A", &["a"], &["x"])
            .component("B", &["x"], &["y"])
            .component("C", &["y"], &["z"])
            .component("D", &["z", "x"], &["w"]);
        builder
    }

    #[test]
    fn test_acyclicity_validation() {
        assert!(builder().build(None).is_ok());

        // add cycles at different levels
        let mut builder = builder();
        builder.component("E", &["w"], &["p"]);
        builder.component("F", &["p"], &["q"]);
        builder.extend_inputs("C", &["q"]);
        assert!(builder
            .build(None)
            .is_err_and(|e| e == Error::configuration("Cycle detected: D -> E -> F -> C -> D")));

        let mut builder = self::builder();
        builder.extend_inputs("B", &["z"]);
        assert!(builder
            .build(None)
            .is_err_and(|e| e == Error::configuration("Cycle detected: B -> C -> B")));

        let mut builder = self::builder();
        builder.extend_inputs("A", &["w"]);
        assert!(builder
            .build(None)
            .is_err_and(|e| e == Error::configuration("Cycle detected: A -> D -> A")));
    }

    #[test]
    fn test_unused_design_variables() {
        let mut builder = builder();
        builder.design("b").design("c");
        assert!(builder.build(None).is_err_and(|e| e
            == Error::configuration(
                "Design variables [\"b\", \"c\"] are not consumed by any component."
            )));

        let config = SizingGraphConfig {
            allow_unused_design_variables: true,
            ..Default::default()
        };
        assert!(builder.build(Some(config)).is_ok());
    }
}
