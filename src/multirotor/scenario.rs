// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The sizing scenarios: the assumed total mass, and the thrust each
//! propeller has to deliver in hover and at takeoff.

use crate::{checked_div, unpack, Component, Error, Scalar, Unit, Variable};

use super::GRAVITY;

const INPUTS: &[Variable] = &[
    Variable::dimensionless("k_os"),
    Variable::new("M_pay", Unit::Kilogram),
    Variable::dimensionless("N_pro_arm"),
    Variable::dimensionless("N_arm"),
    Variable::new("a_to", Unit::MeterPerSecondSquared),
];

const OUTPUTS: &[Variable] = &[
    Variable::new("M_total", Unit::Kilogram),
    Variable::dimensionless("N_pro"),
    Variable::new("F_pro_hov", Unit::Newton),
    Variable::new("F_pro_to", Unit::Newton),
];

/// Converts the payload into an assumed total mass, using the oversizing
/// coefficient `k_os`, and splits the hover and takeoff thrust between the
/// propellers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scenario;

impl Component for Scenario {
    fn name(&self) -> &str {
        "Scenario"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [k_os, m_pay, n_pro_arm, n_arm, a_to] = unpack(self, inputs)?;

        let m_total = k_os * m_pay;
        let n_pro = n_pro_arm * n_arm;
        let f_pro_hov = checked_div(m_total * GRAVITY, n_pro, "F_pro_hov")?;
        let f_pro_to = checked_div(m_total * (a_to + GRAVITY), n_pro, "F_pro_to")?;

        Ok(vec![m_total, n_pro, f_pro_hov, f_pro_to])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex_step::assert_matches_central_differences;
    use approx::assert_relative_eq;

    #[test]
    fn test_thrust_targets() -> Result<(), Error> {
        let outputs = Scenario.compute(&[2.0, 1.0, 1.0, 4.0, 5.0])?;

        assert_eq!(outputs[0], 2.0);
        assert_eq!(outputs[1], 4.0);
        assert_relative_eq!(outputs[2], 4.905);
        assert_relative_eq!(outputs[3], 7.405);

        Ok(())
    }

    #[test]
    fn test_propeller_count_is_exact() -> Result<(), Error> {
        for (n_pro_arm, n_arm) in [(1.0, 3.0), (2.0, 4.0), (1.0, 6.0), (2.0, 8.0)] {
            let outputs = Scenario.compute(&[3.2, 0.7, n_pro_arm, n_arm, 2.0])?;
            assert_eq!(outputs[1], n_pro_arm * n_arm);
            assert_eq!(outputs[1].fract(), 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_no_propellers() {
        assert!(Scenario
            .compute(&[2.0, 1.0, 1.0, 0.0, 5.0])
            .is_err_and(|e| e
                == Error::domain("Division by zero.").with_variable("F_pro_hov")));
        assert!(Scenario
            .compute(&[2.0, 1.0, 0.0, 4.0, 5.0])
            .is_err_and(|e| e.is_domain()));
    }

    #[test]
    fn test_derivatives() {
        assert_matches_central_differences(&Scenario, &[3.2, 4.0, 1.0, 4.0, 2.4525]);
    }
}
