// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating a [`SizingGraph`].

mod validate_graph;

use crate::{Error, SizingGraph};

pub(crate) struct SizingGraphValidator<'a> {
    sg: &'a SizingGraph,
}

impl SizingGraph {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let validator = SizingGraphValidator { sg: self };

        validator.validate_acyclicity()?;
        validator.validate_design_variables_used()?;

        Ok(())
    }
}
