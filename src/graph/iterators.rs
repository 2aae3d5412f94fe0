// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over components and connections in a `SizingGraph`.

use petgraph::graph::DiGraph;

use crate::{Component, Node, SizingGraph, Variable};

/// An iterator over the components in a `SizingGraph`, in registration order.
pub struct Components<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<Box<dyn Node>>>,
}

impl<'a> Iterator for Components<'a> {
    type Item = &'a dyn Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| n.weight.as_ref())
    }
}

/// An iterator over the connections in a `SizingGraph`.
///
/// Each item is the name of the producer, the name of the consumer, and the
/// variables flowing between them.
pub struct Connections<'a> {
    pub(crate) sg: &'a SizingGraph,
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<()>>,
}

impl<'a> Iterator for Connections<'a> {
    type Item = (&'a str, &'a str, &'a [Variable]);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().and_then(|e| {
            let variables = self.sg.edges.get(&(e.source(), e.target()))?;
            Some((
                self.sg.graph[e.source()].name(),
                self.sg.graph[e.target()].name(),
                variables.as_slice(),
            ))
        })
    }
}

/// An iterator over the neighbors of a component in a `SizingGraph`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a DiGraph<Box<dyn Node>, ()>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, ()>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a dyn Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| self.graph[i].as_ref())
    }
}

/// An iterator over the names of the components of a `SizingGraph`, in the
/// order they are evaluated in.
pub struct ExecutionOrder<'a> {
    pub(crate) sg: &'a SizingGraph,
    pub(crate) iter: std::slice::Iter<'a, crate::graph::Step>,
}

impl<'a> Iterator for ExecutionOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|step| self.sg.graph[step.node].name())
    }
}
