// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`SizingGraph`] instances from given components and
//! design variables.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::{Component, Error, Node, SizingGraphConfig, Variable};

use super::{EdgeMap, NodeIndexMap, SizingGraph, Step, VariableLayout};

/// Where a variable comes from: a design variable declaration, or an output
/// slot of a component.
#[derive(Clone, Copy)]
enum Source {
    Design(Variable),
    Output(NodeIndex, Variable),
}

/// `SizingGraph` instantiation.
impl SizingGraph {
    /// Creates a new [`SizingGraph`] from the given components and design
    /// variables.
    ///
    /// Returns a configuration error if the components don't form a valid
    /// DAG, or if the declared units of a producer and a consumer disagree.
    pub fn try_new<
        NodeIterator: IntoIterator<Item = Box<dyn Node>>,
        VariableIterator: IntoIterator<Item = Variable>,
    >(
        components: NodeIterator,
        design_variables: VariableIterator,
        config: SizingGraphConfig,
    ) -> Result<Self, Error> {
        let (graph, indices) = Self::create_graph(components)?;
        let design_variables = Self::collect_design_variables(design_variables)?;

        let mut sg = Self {
            graph,
            node_indices: indices,
            edges: EdgeMap::new(),
            design_variables,
            steps: vec![],
            layout: Arc::new(VariableLayout {
                variables: vec![],
                indices: HashMap::new(),
                n_design: 0,
            }),
            config,
        };
        let sources = sg.find_sources()?;
        sg.add_connections(&sources)?;

        sg.validate()?;

        sg.plan_execution(&sources)?;

        tracing::debug!(
            "Assembled sizing graph with {} components and {} design variables. Execution order: {}",
            sg.graph.node_count(),
            sg.design_variables.len(),
            sg.execution_order().collect::<Vec<_>>().join(" -> ")
        );

        Ok(sg)
    }

    fn create_graph(
        components: impl IntoIterator<Item = Box<dyn Node>>,
    ) -> Result<(DiGraph<Box<dyn Node>, ()>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for component in components {
            let name = component.name().to_string();

            if name.is_empty() {
                return Err(Error::configuration("Component name can't be empty."));
            }
            if indices.contains_key(&name) {
                return Err(Error::configuration(format!(
                    "Duplicate component name found: {name}"
                )));
            }

            let mut declared = HashSet::new();
            for variable in component.inputs().iter().chain(component.outputs()) {
                if !declared.insert(variable.name) {
                    return Err(Error::configuration(format!(
                        "Component {name} declares variable {} more than once.",
                        variable.name
                    )));
                }
            }

            let idx = graph.add_node(component);
            indices.insert(name, idx);
        }

        Ok((graph, indices))
    }

    fn collect_design_variables(
        design_variables: impl IntoIterator<Item = Variable>,
    ) -> Result<Vec<Variable>, Error> {
        let mut seen = HashSet::new();
        let mut collected = vec![];
        for variable in design_variables {
            if !seen.insert(variable.name) {
                return Err(Error::configuration(format!(
                    "Duplicate design variable found: {}",
                    variable.name
                )));
            }
            collected.push(variable);
        }
        Ok(collected)
    }

    /// Finds the single source of every variable in the graph.
    fn find_sources(&self) -> Result<HashMap<&'static str, Source>, Error> {
        let mut sources = HashMap::new();
        for variable in &self.design_variables {
            sources.insert(variable.name, Source::Design(*variable));
        }

        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            for output in node.outputs() {
                match sources.get(output.name) {
                    Some(Source::Design(_)) => {
                        return Err(Error::configuration(format!(
                            "Variable {} is declared as a design variable, but is also produced by {}.",
                            output.name,
                            node.name()
                        )));
                    }
                    Some(Source::Output(other, _)) => {
                        return Err(Error::configuration(format!(
                            "Variable {} is produced by both {} and {}.",
                            output.name,
                            self.graph[*other].name(),
                            node.name()
                        )));
                    }
                    None => {
                        sources.insert(output.name, Source::Output(idx, *output));
                    }
                }
            }
        }

        Ok(sources)
    }

    fn add_connections(&mut self, sources: &HashMap<&'static str, Source>) -> Result<(), Error> {
        for consumer_idx in self.graph.node_indices().collect::<Vec<_>>() {
            let consumer = &self.graph[consumer_idx];
            let mut connections = vec![];

            for input in consumer.inputs() {
                let (source_unit, source_desc) = match sources.get(input.name) {
                    Some(Source::Design(variable)) => (variable.unit, "design variable".to_string()),
                    Some(Source::Output(producer_idx, variable)) => {
                        connections.push((*producer_idx, *input));
                        (
                            variable.unit,
                            format!("output of {}", self.graph[*producer_idx].name()),
                        )
                    }
                    None => {
                        return Err(Error::configuration(format!(
                            "Input {} of {} has no producer and is not a design variable.",
                            input.name,
                            consumer.name()
                        )));
                    }
                };

                if source_unit != input.unit {
                    return Err(Error::configuration(format!(
                        "Unit mismatch for {}: {} expects {}, but the {} is in {}.",
                        input.name,
                        consumer.name(),
                        input.unit,
                        source_desc,
                        source_unit
                    )));
                }
            }

            for (producer_idx, variable) in connections {
                self.edges
                    .entry((producer_idx, consumer_idx))
                    .or_default()
                    .push(variable);
                self.graph.update_edge(producer_idx, consumer_idx, ());
            }
        }

        Ok(())
    }

    /// Sorts the components topologically, and assigns every variable a
    /// position in the value vector.
    fn plan_execution(&mut self, sources: &HashMap<&'static str, Source>) -> Result<(), Error> {
        let order = petgraph::algo::toposort(&self.graph, None).map_err(|cycle| {
            Error::internal(format!(
                "Cycle through {} found after validation.",
                self.graph[cycle.node_id()].name()
            ))
        })?;

        let mut variables = self.design_variables.clone();
        for idx in &order {
            variables.extend(self.graph[*idx].outputs().iter().copied());
        }
        let indices: HashMap<&'static str, usize> = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name, i))
            .collect();

        let mut steps = Vec::with_capacity(order.len());
        for idx in order {
            let node = &self.graph[idx];
            let mut inputs = vec![];
            for input in node.inputs() {
                if !sources.contains_key(input.name) {
                    return Err(Error::internal(format!(
                        "No source for {} found after validation.",
                        input.name
                    )));
                }
                inputs.push(indices[input.name]);
            }
            let outputs = node.outputs().iter().map(|v| indices[v.name]).collect();
            steps.push(Step {
                node: idx,
                inputs,
                outputs,
            });
        }

        self.steps = steps;
        self.layout = Arc::new(VariableLayout {
            n_design: self.design_variables.len(),
            variables,
            indices,
        });

        Ok(())
    }
}
