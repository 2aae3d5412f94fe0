// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The contract between a [`SizingGraph`] and an external optimizer: which
//! variable to optimize, which variables are constraint residuals, and which
//! design variables the optimizer is free to change.

use std::collections::HashSet;

use crate::{DesignVector, Error, EvaluationRecord, Jacobian, SizingGraph};

/// The variable an optimizer should drive, and in which direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Objective {
    Minimize(&'static str),
    Maximize(&'static str),
}

impl Objective {
    /// Returns the name of the objective variable.
    pub fn variable(&self) -> &'static str {
        match self {
            Self::Minimize(name) | Self::Maximize(name) => name,
        }
    }

    /// The factor that turns the objective variable into a quantity to be
    /// minimized.
    fn sign(&self) -> f64 {
        match self {
            Self::Minimize(_) => 1.0,
            Self::Maximize(_) => -1.0,
        }
    }
}

/// The range a free design variable may take.
///
/// Bounds are reported to the optimizer, and are never enforced during
/// evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Creates new bounds, failing unless `lower <= upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, Error> {
        if !(lower <= upper) {
            return Err(Error::configuration(format!(
                "Lower bound {lower} is greater than upper bound {upper}."
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Returns the lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns true if `value` lies within the bounds, both ends included.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Returns `value` limited to the bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// A sizing graph together with the objective, constraints and bounds an
/// optimizer needs to drive it.
///
/// Objective values are always to be minimized: a [`Objective::Maximize`]
/// objective is reported negated, and so is its gradient.  Constraint
/// residuals are feasible when non-negative.
///
/// Design variables without bounds are held constant by the optimizer.
/// Gradients and Jacobians are taken with respect to the free design
/// variables only, in the order their bounds were given.
pub struct SizingProblem {
    graph: SizingGraph,
    objective: Objective,
    constraints: Vec<&'static str>,
    bounds: Vec<(&'static str, Bounds)>,
}

impl SizingProblem {
    /// Creates a new [`SizingProblem`].
    ///
    /// Returns a configuration error if the objective or a constraint is not
    /// a variable of the graph, if a constraint is listed twice, or if bounds
    /// are given for anything but a design variable, or given twice.
    pub fn try_new(
        graph: SizingGraph,
        objective: Objective,
        constraints: impl IntoIterator<Item = &'static str>,
        bounds: impl IntoIterator<Item = (&'static str, Bounds)>,
    ) -> Result<Self, Error> {
        if graph.variable(objective.variable()).is_none() {
            return Err(Error::configuration(format!(
                "Objective {} is not a variable of the graph.",
                objective.variable()
            ))
            .with_variable(objective.variable()));
        }

        let mut seen = HashSet::new();
        let constraints = constraints.into_iter().collect::<Vec<_>>();
        for name in &constraints {
            if graph.variable(name).is_none() {
                return Err(Error::configuration(format!(
                    "Constraint {name} is not a variable of the graph."
                ))
                .with_variable(*name));
            }
            if !seen.insert(*name) {
                return Err(
                    Error::configuration(format!("Duplicate constraint found: {name}"))
                        .with_variable(*name),
                );
            }
        }

        let mut seen = HashSet::new();
        let bounds = bounds.into_iter().collect::<Vec<_>>();
        for (name, _) in &bounds {
            if !graph.is_design_variable(name) {
                return Err(Error::configuration(format!(
                    "Bounds given for {name}, which is not a design variable."
                ))
                .with_variable(*name));
            }
            if !seen.insert(*name) {
                return Err(
                    Error::configuration(format!("Duplicate bounds found for {name}"))
                        .with_variable(*name),
                );
            }
        }

        Ok(Self {
            graph,
            objective,
            constraints,
            bounds,
        })
    }

    /// Returns the underlying sizing graph.
    pub fn graph(&self) -> &SizingGraph {
        &self.graph
    }

    /// Evaluates the sizing graph at the given design point.
    pub fn evaluate(&self, design: &DesignVector) -> Result<EvaluationRecord, Error> {
        self.graph.evaluate(design)
    }

    /// Returns the objective definition.
    pub fn objective_definition(&self) -> Objective {
        self.objective
    }

    /// Returns the names of the constraint residuals, in order.
    pub fn constraint_names(&self) -> &[&'static str] {
        &self.constraints
    }

    /// Returns the names of the free design variables, in order.
    pub fn free_variables(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bounds.iter().map(|(name, _)| *name)
    }

    /// Returns the bounds of the free design variable `name`.
    pub fn bounds(&self, name: &str) -> Result<Bounds, Error> {
        self.bounds
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, b)| *b)
            .ok_or_else(|| {
                Error::variable_not_found(format!("{name} is not a free design variable."))
                    .with_variable(name)
            })
    }

    /// Returns the objective value of an evaluation, to be minimized.
    pub fn objective(&self, record: &EvaluationRecord) -> Result<f64, Error> {
        Ok(self.objective.sign() * record.value(self.objective.variable())?)
    }

    /// Returns the constraint residuals of an evaluation, in order.
    pub fn constraints(&self, record: &EvaluationRecord) -> Result<Vec<f64>, Error> {
        self.constraints
            .iter()
            .map(|name| record.value(name))
            .collect()
    }

    /// Returns the gradient of the objective value with respect to the free
    /// design variables.
    pub fn objective_gradient(&self, record: &EvaluationRecord) -> Result<Vec<f64>, Error> {
        let sign = self.objective.sign();
        self.free_variables()
            .map(|wrt| Ok(sign * record.total_derivative(self.objective.variable(), wrt)?))
            .collect()
    }

    /// Returns the derivatives of the constraint residuals with respect to
    /// the free design variables, with one row per constraint.
    pub fn constraint_jacobian(&self, record: &EvaluationRecord) -> Result<Jacobian, Error> {
        let wrt = self.free_variables().collect::<Vec<_>>();
        record.total_jacobian(&self.constraints, &wrt)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::graph::test_utils::SizingGraphBuilder;
    use crate::ErrorKind;

    fn graph() -> Result<SizingGraph, Error> {
        let mut builder = SizingGraphBuilder::new();
        builder
            .design("a")
            .design("b")
            .component("Third", &["x", "y"], &["w"])
            .component("First", &["a"], &["x"])
            .component("Second", &["x", "b"], &["y", "z"]);
        builder.build(None)
    }

    fn design(a: f64, b: f64) -> DesignVector {
        DesignVector::from([("a".to_string(), a), ("b".to_string(), b)])
    }

    #[test]
    fn test_bounds() -> Result<(), Error> {
        let bounds = Bounds::new(0.3, 0.6)?;
        assert!(bounds.contains(0.3));
        assert!(bounds.contains(0.6));
        assert!(!bounds.contains(0.61));
        assert_eq!(bounds.clamp(0.1), 0.3);
        assert_eq!(bounds.clamp(0.45), 0.45);
        assert_eq!(bounds.clamp(7.0), 0.6);

        assert_eq!((bounds.lower(), bounds.upper()), (0.3, 0.6));

        let point = Bounds::new(1.0, 1.0)?;
        assert_eq!(point.clamp(-3.0), 1.0);
        assert_eq!(point.clamp(3.0), 1.0);
        assert!(Bounds::new(2.0, 1.0).is_err_and(|e| e
            == Error::configuration("Lower bound 2 is greater than upper bound 1.")));
        assert!(Bounds::new(f64::NAN, 1.0).is_err_and(|e| e.kind() == ErrorKind::Configuration));

        Ok(())
    }

    #[test]
    fn test_problem_definition() -> Result<(), Error> {
        assert!(SizingProblem::try_new(
            graph()?,
            Objective::Minimize("q"),
            ["z"],
            [("a", Bounds::new(0.0, 1.0)?)]
        )
        .is_err_and(|e| e
            == Error::configuration("Objective q is not a variable of the graph.")
                .with_variable("q")));

        assert!(SizingProblem::try_new(
            graph()?,
            Objective::Minimize("w"),
            ["z", "y", "z"],
            [("a", Bounds::new(0.0, 1.0)?)]
        )
        .is_err_and(|e| e
            == Error::configuration("Duplicate constraint found: z").with_variable("z")));

        assert!(SizingProblem::try_new(
            graph()?,
            Objective::Minimize("w"),
            ["z"],
            [("x", Bounds::new(0.0, 1.0)?)]
        )
        .is_err_and(|e| e
            == Error::configuration("Bounds given for x, which is not a design variable.")
                .with_variable("x")));

        assert!(SizingProblem::try_new(
            graph()?,
            Objective::Minimize("w"),
            ["z"],
            [("a", Bounds::new(0.0, 1.0)?), ("a", Bounds::new(0.0, 2.0)?)]
        )
        .is_err_and(|e| e.kind() == ErrorKind::Configuration));

        let problem = SizingProblem::try_new(
            graph()?,
            Objective::Minimize("w"),
            ["z", "y"],
            [("b", Bounds::new(0.0, 5.0)?)],
        )?;
        assert_eq!(problem.free_variables().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(problem.bounds("b")?, Bounds::new(0.0, 5.0)?);
        assert!(problem
            .bounds("a")
            .is_err_and(|e| e.kind() == ErrorKind::VariableNotFound));
        assert_eq!(problem.constraint_names(), &["z", "y"]);
        assert_eq!(problem.objective_definition(), Objective::Minimize("w"));

        Ok(())
    }

    #[test]
    fn test_projections() -> Result<(), Error> {
        let problem = SizingProblem::try_new(
            graph()?,
            Objective::Minimize("w"),
            ["z", "y"],
            [("b", Bounds::new(0.0, 5.0)?), ("a", Bounds::new(-1.0, 1.0)?)],
        )?;
        let record = problem.evaluate(&design(1.0, 2.0))?;

        assert_eq!(problem.objective(&record)?, 86.0);
        assert_eq!(problem.constraints(&record)?, vec![17.0, 9.0]);

        let gradient = problem.objective_gradient(&record)?;
        assert_relative_eq!(gradient[0], 72.0);
        assert_relative_eq!(gradient[1], 152.0);

        let jacobian = problem.constraint_jacobian(&record)?;
        assert_eq!((jacobian.n_outputs(), jacobian.n_inputs()), (2, 2));
        assert_relative_eq!(jacobian.get(0, 0), 8.0);
        assert_relative_eq!(jacobian.get(0, 1), 16.0);
        assert_relative_eq!(jacobian.get(1, 0), 4.0);
        assert_relative_eq!(jacobian.get(1, 1), 8.0);

        Ok(())
    }

    #[test]
    fn test_maximize() -> Result<(), Error> {
        let problem = SizingProblem::try_new(
            graph()?,
            Objective::Maximize("w"),
            Vec::<&str>::new(),
            [("a", Bounds::new(-1.0, 1.0)?)],
        )?;
        let record = problem.evaluate(&design(1.0, 2.0))?;

        assert_eq!(problem.objective(&record)?, -86.0);
        assert_relative_eq!(problem.objective_gradient(&record)?[0], -152.0);
        assert!(problem.constraints(&record)?.is_empty());

        Ok(())
    }
}
