// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Battery selection from a payload-scaled mass budget.

use crate::{checked_div, unpack, Component, Error, Scalar, Unit, Variable};

const INPUTS: &[Variable] = &[
    Variable::dimensionless("k_mb"),
    Variable::new("M_pay", Unit::Kilogram),
    Variable::new("E_bat_ref", Unit::Joule),
    Variable::new("M_bat_ref", Unit::Kilogram),
    Variable::new("U_bat", Unit::Volt),
    Variable::new("I_bat_max_ref", Unit::Ampere),
    Variable::new("C_bat_ref", Unit::AmpereSecond),
    Variable::new("P_el_mot_hov", Unit::Watt),
    Variable::dimensionless("N_pro"),
];

const OUTPUTS: &[Variable] = &[
    Variable::new("M_bat", Unit::Kilogram),
    Variable::new("E_bat", Unit::Joule),
    Variable::new("C_bat", Unit::AmpereSecond),
    Variable::new("I_bat_max", Unit::Ampere),
    Variable::new("P_bat_max", Unit::Watt),
    Variable::new("I_bat_hov", Unit::Ampere),
];

/// Share of the stored energy that may be drawn from the battery.
pub const DEPTH_OF_DISCHARGE: f64 = 0.8;

/// Efficiency of the power train between the battery and the motors.
pub const POWERTRAIN_EFFICIENCY: f64 = 0.95;

/// Sizes the battery mass as a multiple of the payload, and scales energy,
/// capacity and maximum current linearly from a reference battery.
#[derive(Clone, Copy, Debug, Default)]
pub struct Battery;

impl Component for Battery {
    fn name(&self) -> &str {
        "Battery"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [
            k_mb,
            m_pay,
            e_bat_ref,
            m_bat_ref,
            u_bat,
            i_bat_max_ref,
            c_bat_ref,
            p_el_mot_hov,
            n_pro,
        ] = unpack(self, inputs)?;

        let m_bat = k_mb * m_pay;
        let e_bat = checked_div(e_bat_ref * m_bat, m_bat_ref, "E_bat")? * DEPTH_OF_DISCHARGE;
        let c_bat = checked_div(e_bat, u_bat, "C_bat")?;
        let i_bat_max = i_bat_max_ref * checked_div(c_bat, c_bat_ref, "I_bat_max")?;
        let p_bat_max = u_bat * i_bat_max;
        let i_bat_hov = checked_div(
            p_el_mot_hov * n_pro / POWERTRAIN_EFFICIENCY,
            u_bat,
            "I_bat_hov",
        )?;

        Ok(vec![m_bat, e_bat, c_bat, i_bat_max, p_bat_max, i_bat_hov])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex_step::assert_matches_central_differences;
    use approx::assert_relative_eq;

    const REFERENCE: [f64; 9] = [
        1.0,
        4.0,
        260568.0,
        0.329,
        17.148222428981565,
        250.0,
        18000.0,
        464.0143787214234,
        4.0,
    ];

    #[test]
    fn test_sizing() -> Result<(), Error> {
        let outputs = Battery.compute(&REFERENCE)?;

        assert_relative_eq!(outputs[0], 4.0);
        assert_relative_eq!(outputs[1], 2534400.0, max_relative = 1e-12);
        assert_relative_eq!(outputs[2], 147793.74424935764, max_relative = 1e-12);
        assert_relative_eq!(outputs[3], 2052.6908923521896, max_relative = 1e-12);
        assert_relative_eq!(outputs[4], 35200.0, max_relative = 1e-12);
        assert_relative_eq!(outputs[5], 113.93278578013461, max_relative = 1e-12);

        Ok(())
    }

    #[test]
    fn test_payload_scaled_battery() -> Result<(), Error> {
        let outputs =
            Battery.compute(&[5.0, 1.0, 1e6, 1.0, 20.0, 250.0, 18000.0, 464.0, 4.0])?;

        assert_relative_eq!(outputs[0], 5.0);
        assert_relative_eq!(outputs[1], 4.0e6, max_relative = 1e-12);
        assert_relative_eq!(outputs[2], 2.0e5, max_relative = 1e-12);
        assert_relative_eq!(outputs[3], 2777.777777777778, max_relative = 1e-12);
        assert_relative_eq!(outputs[4], 55555.555555555555, max_relative = 1e-12);
        assert_relative_eq!(outputs[5], 97.6842105263158, max_relative = 1e-12);

        Ok(())
    }

    #[test]
    fn test_energy_scaling() -> Result<(), Error> {
        let mut inputs = REFERENCE;
        inputs[0] = 1.7;
        inputs[1] = 2.3;
        let outputs = Battery.compute(&inputs)?;

        let m_bat = 1.7 * 2.3;
        assert_eq!(outputs[0], m_bat);
        assert_eq!(outputs[1], 260568.0 * m_bat / 0.329 * 0.8);

        Ok(())
    }

    #[test]
    fn test_no_bus_voltage() {
        let mut inputs = REFERENCE;
        inputs[4] = 0.0;
        assert!(Battery.compute(&inputs).is_err_and(|e| e
            == Error::domain("Division by zero.").with_variable("C_bat")));
    }

    #[test]
    fn test_derivatives() {
        assert_matches_central_differences(&Battery, &REFERENCE);
    }
}
