// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Multirotor Sizing

This is a library for sizing the drivetrain of a multirotor aircraft (frame,
propellers, motors, speed controllers and battery) from a small set of design
variables.

The sizing models are represented as a Directed Acyclic Graph (DAG) of pure
physical relations.  Each evaluation of the graph produces every physical
attribute of the design, a set of feasibility constraints and objective
quantities, and exact derivatives of all of them, for consumption by an
external gradient-based optimizer.

## The `Component` and `Node` traits

Every relation in the graph implements the [`Component`] trait.  A component
declares its inputs and outputs as named [`Variable`]s with a [`Unit`], and
computes its outputs generically over [`Scalar`].

The graph stores components as [`Node`] trait objects.  `Node` is implemented
for every `Component`, and adds complex-step differentiation: each input is
perturbed by a tiny imaginary step, and the derivative is read off the
imaginary part of the outputs.

## Assembly

A [`SizingGraph`] is created with [`try_new`][SizingGraph::try_new] from the
components and the design variables.  The method checks that:

- Component names are unique.
- Every variable has exactly one source: a design variable declaration or a
  component output.
- Every component input has a source, with the same unit.
- There are no cycles in the graph.
- Every design variable is used, unless configured otherwise.

If any of the validation steps fail, the method will return an [`Error`], and
a [`SizingGraph`] instance otherwise.

## Evaluation

[`evaluate`][SizingGraph::evaluate] runs the components in topological order
and returns an immutable [`EvaluationRecord`], holding all values, the
partial derivatives of every component, and the total derivatives of every
variable with respect to the design variables.

Operations that leave their mathematical domain, like a division by zero or a
square root of a negative number, fail the evaluation with a domain error that
names the component and variable, instead of producing NaN or infinity.

## The multirotor problem

The [`multirotor`] module contains the eight sizing components of a
multirotor, and builds the [`SizingProblem`] that an optimizer consumes:

- [`multirotor::graph`]
- [`multirotor::problem`]
- [`multirotor::reference_design`]
*/

mod complex_step;
pub use complex_step::{Jacobian, Linearization};

mod config;
pub use config::{SizingGraphConfig, DEFAULT_COMPLEX_STEP};

mod graph;
pub use graph::{iterators, SizingGraph};

mod graph_traits;
pub use graph_traits::{unpack, Component, Node};

mod error;
pub use error::{Error, ErrorKind};

pub mod multirotor;

mod problem;
pub use problem::{Bounds, Objective, SizingProblem};

mod record;
pub use record::{DesignVector, EvaluationRecord, Partials};

mod scalar;
pub use scalar::{checked_div, checked_powf, checked_sqrt, ensure_positive, Scalar};

mod units;
pub use units::{Unit, Variable};
