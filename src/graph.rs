// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of the components of a sizing problem, and the
//! variables that flow between them.

mod creation;
mod evaluation;
pub mod iterators;
mod retrieval;
mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

use crate::{Node, SizingGraphConfig, Variable};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::sync::Arc;

/// `Node`s stored in a `DiGraph` instance can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any component
/// name, so that Nodes in the `DiGraph` can be retrieved from their names.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// The variables carried by a connection are not stored in the `DiGraph`
/// instance, so we need to store them separately.
///
/// `EdgeMap` can be used to lookup the variables flowing from a producer to
/// a consumer, for any pair of source and destination `NodeIndex` values.
pub(crate) type EdgeMap = HashMap<(NodeIndex, NodeIndex), Vec<Variable>>;

/// The positions of all variables of a graph in the value vector of an
/// evaluation.
///
/// Design variables come first, in declaration order, followed by the
/// outputs of each component in execution order.
#[derive(Debug, PartialEq)]
pub(crate) struct VariableLayout {
    pub(crate) variables: Vec<Variable>,
    pub(crate) indices: HashMap<&'static str, usize>,
    pub(crate) n_design: usize,
}

impl VariableLayout {
    pub(crate) fn index(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }
}

/// A component in execution order, with the positions of its inputs and
/// outputs in the value vector.
pub(crate) struct Step {
    pub(crate) node: NodeIndex,
    pub(crate) inputs: Vec<usize>,
    pub(crate) outputs: Vec<usize>,
}

/// A validated, topologically ordered graph of sizing components.
///
/// Edges point from the component producing a variable to the components
/// consuming it.  Inputs that no component produces must be declared as
/// design variables, whose values are supplied on every evaluation.
pub struct SizingGraph {
    graph: DiGraph<Box<dyn Node>, ()>,
    node_indices: NodeIndexMap,
    edges: EdgeMap,
    design_variables: Vec<Variable>,
    steps: Vec<Step>,
    layout: Arc<VariableLayout>,
    config: SizingGraphConfig,
}
