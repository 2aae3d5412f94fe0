// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Feasibility residuals, each non-negative when its requirement is met.

use crate::{unpack, Component, Error, Scalar, Unit, Variable};

use super::battery::POWERTRAIN_EFFICIENCY;

const INPUTS: &[Variable] = &[
    Variable::new("M_total", Unit::Kilogram),
    Variable::new("M_total_real", Unit::Kilogram),
    Variable::new("T_max_mot", Unit::NewtonMeter),
    Variable::new("T_pro_to", Unit::NewtonMeter),
    Variable::new("U_bat", Unit::Volt),
    Variable::new("U_mot_to", Unit::Volt),
    Variable::new("P_bat_max", Unit::Watt),
    Variable::new("P_el_mot_to", Unit::Watt),
    Variable::dimensionless("N_pro"),
    Variable::new("U_esc", Unit::Volt),
    Variable::new("t_hov", Unit::Minute),
    Variable::new("t_hov_spec", Unit::Minute),
    Variable::new("MTOW", Unit::Kilogram),
];

const OUTPUTS: &[Variable] = &[
    Variable::dimensionless("cons_1"),
    Variable::dimensionless("cons_2"),
    Variable::dimensionless("cons_3"),
    Variable::dimensionless("cons_4"),
    Variable::dimensionless("cons_5"),
    Variable::dimensionless("cons_6"),
    Variable::dimensionless("cons_7"),
];

/// Compares assumed and realized quantities:
///
/// | Residual | Requirement                                           |
/// |----------|-------------------------------------------------------|
/// | `cons_1` | the assumed total mass covers the real one            |
/// | `cons_2` | the motor can deliver the takeoff torque              |
/// | `cons_3` | the bus voltage covers the motor takeoff voltage      |
/// | `cons_4` | the battery can deliver the takeoff power             |
/// | `cons_5` | the speed controller is rated for the bus voltage     |
/// | `cons_6` | the hover time reaches the specified endurance        |
/// | `cons_7` | the real total mass stays below the takeoff limit     |
#[derive(Clone, Copy, Debug, Default)]
pub struct Constraints;

impl Component for Constraints {
    fn name(&self) -> &str {
        "Constraints"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [
            m_total,
            m_total_real,
            t_max_mot,
            t_pro_to,
            u_bat,
            u_mot_to,
            p_bat_max,
            p_el_mot_to,
            n_pro,
            u_esc,
            t_hov,
            t_hov_spec,
            mtow,
        ] = unpack(self, inputs)?;

        Ok(vec![
            m_total - m_total_real,
            t_max_mot - t_pro_to,
            u_bat - u_mot_to,
            p_bat_max - p_el_mot_to * n_pro / POWERTRAIN_EFFICIENCY,
            u_esc - u_bat,
            t_hov - t_hov_spec,
            mtow - m_total_real,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex_step::assert_matches_central_differences;
    use approx::assert_relative_eq;

    const REFERENCE: [f64; 13] = [
        12.8,
        9.591398744354727,
        1.066358899023527,
        1.0977223960536313,
        17.148222428981565,
        19.010528041018002,
        35200.0,
        663.5425537281208,
        4.0,
        18.389569302105922,
        21.62001968051691,
        25.0,
        15.0,
    ];

    #[test]
    fn test_residuals() -> Result<(), Error> {
        let outputs = Constraints.compute(&REFERENCE)?;

        let expected = [
            3.2086012556452737,
            -0.031363497030104215,
            -1.8623056120364367,
            32406.136615881598,
            1.2413468731243569,
            -3.3799803194830886,
            5.408601255645273,
        ];
        for (output, expected) in outputs.iter().zip(expected) {
            assert_relative_eq!(*output, expected, max_relative = 1e-9);
        }

        Ok(())
    }

    #[test]
    fn test_undersized_mass_budget() -> Result<(), Error> {
        let mut inputs = REFERENCE;
        inputs[0] = 6.0;
        inputs[1] = 8.608983779719916;
        let outputs = Constraints.compute(&inputs)?;
        assert!(outputs[0] < 0.0);
        assert_relative_eq!(outputs[0], -2.6089837797199156, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn test_residuals_are_dimensionless() {
        assert_eq!(Constraints.outputs().len(), 7);
        for output in Constraints.outputs() {
            assert_eq!(output.unit, Unit::Dimensionless, "{output}");
        }
    }

    #[test]
    fn test_derivatives() {
        assert_matches_central_differences(&Constraints, &REFERENCE);
    }
}
