// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving components, connections and variables from a
//! [`SizingGraph`].

use crate::iterators::{Components, Connections, ExecutionOrder, Neighbors};
use crate::{Error, Node, SizingGraph, SizingGraphConfig, Variable};

/// `Component`, `Connection` and `Variable` retrieval.
impl SizingGraph {
    /// Returns the component with the given `name`, if it exists.
    pub fn component(&self, name: &str) -> Result<&dyn Node, Error> {
        self.node_indices
            .get(name)
            .map(|i| self.graph[*i].as_ref())
            .ok_or_else(|| Error::component_not_found(format!("Component {} not found.", name)))
    }

    /// Returns an iterator over the components in the graph.
    pub fn components(&self) -> Components {
        Components {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the connections in the graph.
    pub fn connections(&self) -> Connections {
        Connections {
            sg: self,
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns an iterator over the *predecessors* of the component with the
    /// given `name`, i.e. the components producing its inputs.
    ///
    /// Returns an error if the given `name` does not exist.
    pub fn predecessors(&self, name: &str) -> Result<Neighbors, Error> {
        self.neighbors(name, petgraph::Direction::Incoming)
    }

    /// Returns an iterator over the *successors* of the component with the
    /// given `name`, i.e. the components consuming its outputs.
    ///
    /// Returns an error if the given `name` does not exist.
    pub fn successors(&self, name: &str) -> Result<Neighbors, Error> {
        self.neighbors(name, petgraph::Direction::Outgoing)
    }

    fn neighbors(&self, name: &str, direction: petgraph::Direction) -> Result<Neighbors, Error> {
        self.node_indices
            .get(name)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self.graph.neighbors_directed(index, direction),
            })
            .ok_or_else(|| Error::component_not_found(format!("Component {} not found.", name)))
    }

    /// Returns the names of the components in the order they are evaluated
    /// in.  Every component comes after the producers of all its inputs.
    pub fn execution_order(&self) -> ExecutionOrder {
        ExecutionOrder {
            sg: self,
            iter: self.steps.iter(),
        }
    }

    /// Returns the declared design variables, in declaration order.
    pub fn design_variables(&self) -> &[Variable] {
        &self.design_variables
    }

    /// Returns the design or computed variable with the given name, if it
    /// exists.
    pub fn variable(&self, name: &str) -> Option<Variable> {
        self.layout.index(name).map(|i| self.layout.variables[i])
    }

    /// Returns true if `name` is a declared design variable.
    pub fn is_design_variable(&self, name: &str) -> bool {
        self.layout
            .index(name)
            .is_some_and(|i| i < self.layout.n_design)
    }

    /// Returns the configuration the graph was created with.
    pub fn config(&self) -> &SizingGraphConfig {
        &self.config
    }
}
