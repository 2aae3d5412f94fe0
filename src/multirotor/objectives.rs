// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Quantities an optimizer can minimize or maximize.

use crate::{checked_div, unpack, Component, Error, Scalar, Unit, Variable};

const INPUTS: &[Variable] = &[
    Variable::new("C_bat", Unit::AmpereSecond),
    Variable::new("I_bat_hov", Unit::Ampere),
    Variable::new("M_esc", Unit::Kilogram),
    Variable::new("M_pro", Unit::Kilogram),
    Variable::new("M_mot", Unit::Kilogram),
    Variable::dimensionless("N_pro"),
    Variable::new("M_pay", Unit::Kilogram),
    Variable::new("M_bat", Unit::Kilogram),
    Variable::new("M_frame", Unit::Kilogram),
];

const OUTPUTS: &[Variable] = &[
    Variable::new("t_hov", Unit::Minute),
    Variable::new("M_total_real", Unit::Kilogram),
];

/// Hover endurance and the total mass of the sized components.
#[derive(Clone, Copy, Debug, Default)]
pub struct Objectives;

impl Component for Objectives {
    fn name(&self) -> &str {
        "Objectives"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [
            c_bat,
            i_bat_hov,
            m_esc,
            m_pro,
            m_mot,
            n_pro,
            m_pay,
            m_bat,
            m_frame,
        ] = unpack(self, inputs)?;

        let t_hov = checked_div(c_bat, i_bat_hov, "t_hov")? / 60.0;
        let m_total_real = (m_esc + m_pro + m_mot) * n_pro + m_pay + m_bat + m_frame;

        Ok(vec![t_hov, m_total_real])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex_step::assert_matches_central_differences;
    use approx::assert_relative_eq;

    const REFERENCE: [f64; 9] = [
        147793.74424935764,
        113.93278578013461,
        0.022146777276377583,
        0.04817684574114985,
        0.25005444678029154,
        4.0,
        4.0,
        4.0,
        0.309886465163452,
    ];

    #[test]
    fn test_objectives() -> Result<(), Error> {
        let outputs = Objectives.compute(&REFERENCE)?;

        assert_relative_eq!(outputs[0], 21.62001968051691, max_relative = 1e-12);
        assert_relative_eq!(outputs[1], 9.591398744354727, max_relative = 1e-12);

        Ok(())
    }

    #[test]
    fn test_no_hover_current() {
        let mut inputs = REFERENCE;
        inputs[1] = 0.0;
        assert!(Objectives.compute(&inputs).is_err_and(|e| e
            == Error::domain("Division by zero.").with_variable("t_hov")));
    }

    #[test]
    fn test_derivatives() {
        assert_matches_central_differences(&Objectives, &REFERENCE);
    }
}
