// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Motor selection from the propeller torque and speed, and its electrical
//! performance in hover and at takeoff.

use crate::{checked_div, checked_powf, unpack, Component, Error, Scalar, Unit, Variable};

use super::estimate_voltage;

const INPUTS: &[Variable] = &[
    Variable::dimensionless("k_mot"),
    Variable::new("T_pro_hov", Unit::NewtonMeter),
    Variable::dimensionless("k_vb"),
    Variable::new("P_pro_to", Unit::Watt),
    Variable::dimensionless("k_speed_mot"),
    Variable::new("Omega_pro_to", Unit::RadianPerSecond),
    Variable::new("M_mot_ref", Unit::Kilogram),
    Variable::new("T_nom_mot_ref", Unit::NewtonMeter),
    Variable::new("R_mot_ref", Unit::Ohm),
    Variable::new("K_T_ref", Unit::NewtonMeterPerAmpere),
    Variable::new("T_mot_fr_ref", Unit::NewtonMeter),
    Variable::new("T_max_mot_ref", Unit::NewtonMeter),
    Variable::new("Omega_pro_hov", Unit::RadianPerSecond),
    Variable::new("T_pro_to", Unit::NewtonMeter),
];

const OUTPUTS: &[Variable] = &[
    Variable::new("T_nom_mot", Unit::NewtonMeter),
    Variable::new("U_bat", Unit::Volt),
    Variable::new("K_T", Unit::NewtonMeterPerAmpere),
    Variable::new("M_mot", Unit::Kilogram),
    Variable::new("R_mot", Unit::Ohm),
    Variable::new("T_mot_fr", Unit::NewtonMeter),
    Variable::new("T_max_mot", Unit::NewtonMeter),
    Variable::new("I_mot_hov", Unit::Ampere),
    Variable::new("U_mot_hov", Unit::Volt),
    Variable::new("P_el_mot_hov", Unit::Watt),
    Variable::new("I_mot_to", Unit::Ampere),
    Variable::new("U_mot_to", Unit::Volt),
    Variable::new("P_el_mot_to", Unit::Watt),
];

/// Scaling-law exponent of mass and friction torque with the nominal torque.
const MASS_EXPONENT: f64 = 3.0 / 3.5;
/// Scaling-law exponent of the winding resistance with the nominal torque.
const RESISTANCE_EXPONENT: f64 = -5.0 / 3.5;

/// Sizes the motor nominal torque on the hover torque and its torque
/// constant on the takeoff speed, and scales every other motor parameter
/// from a reference motor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Motor;

impl Component for Motor {
    fn name(&self) -> &str {
        "Motor"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [
            k_mot,
            t_pro_hov,
            k_vb,
            p_pro_to,
            k_speed_mot,
            omega_pro_to,
            m_mot_ref,
            t_nom_mot_ref,
            r_mot_ref,
            k_t_ref,
            t_mot_fr_ref,
            t_max_mot_ref,
            omega_pro_hov,
            t_pro_to,
        ] = unpack(self, inputs)?;

        let t_nom_mot = k_mot * t_pro_hov;

        let u_bat = estimate_voltage(k_vb, p_pro_to, "U_bat")?;
        let k_t = checked_div(u_bat, k_speed_mot * omega_pro_to, "K_T")?;

        // Scaling laws
        let torque_ratio = checked_div(t_nom_mot, t_nom_mot_ref, "T_nom_mot")?;
        let m_mot = m_mot_ref * checked_powf(torque_ratio, MASS_EXPONENT, "M_mot")?;
        let r_mot = r_mot_ref
            * checked_powf(torque_ratio, RESISTANCE_EXPONENT, "R_mot")?
            * checked_div(k_t, k_t_ref, "R_mot")?.powi(2);
        let t_mot_fr = t_mot_fr_ref * checked_powf(torque_ratio, MASS_EXPONENT, "T_mot_fr")?;
        let t_max_mot = t_max_mot_ref * torque_ratio;

        // Hover
        let i_mot_hov = checked_div(t_pro_hov + t_mot_fr, k_t, "I_mot_hov")?;
        let u_mot_hov = r_mot * i_mot_hov + omega_pro_hov * k_t;
        let p_el_mot_hov = u_mot_hov * i_mot_hov;

        // Takeoff
        let i_mot_to = checked_div(t_pro_to + t_mot_fr, k_t, "I_mot_to")?;
        let u_mot_to = r_mot * i_mot_to + omega_pro_to * k_t;
        let p_el_mot_to = u_mot_to * i_mot_to;

        Ok(vec![
            t_nom_mot,
            u_bat,
            k_t,
            m_mot,
            r_mot,
            t_mot_fr,
            t_max_mot,
            i_mot_hov,
            u_mot_hov,
            p_el_mot_hov,
            i_mot_to,
            u_mot_to,
            p_el_mot_to,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex_step::assert_matches_central_differences;
    use approx::assert_relative_eq;

    const REFERENCE: [f64; 14] = [
        1.0,
        0.8781779168429048,
        1.0,
        492.9255701618269,
        1.2,
        449.04392215547375,
        0.575,
        2.32,
        0.03,
        0.03,
        0.03,
        2.817142857142857,
        401.6370939291052,
        1.0977223960536313,
    ];

    #[test]
    fn test_sizing() -> Result<(), Error> {
        let outputs = Motor.compute(&REFERENCE)?;

        let expected = [
            0.8781779168429048,
            17.148222428981565,
            0.03182358039474122,
            0.25005444678029154,
            0.13523805887707033,
            0.013046318962449994,
            1.066358899023527,
            28.005152932214617,
            16.568892869271313,
            464.0143787214234,
            34.90395176275116,
            19.010528041018002,
            663.5425537281208,
        ];
        for (output, expected) in outputs.iter().zip(expected) {
            assert_relative_eq!(*output, expected, max_relative = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn test_electrical_power_is_voltage_times_current() -> Result<(), Error> {
        let outputs = Motor.compute(&REFERENCE)?;
        assert_eq!(outputs[9], outputs[8] * outputs[7]);
        assert_eq!(outputs[12], outputs[11] * outputs[10]);
        Ok(())
    }

    #[test]
    fn test_bus_voltage_fit() -> Result<(), Error> {
        let mut inputs = REFERENCE;
        inputs[2] = 1.3;
        let outputs = Motor.compute(&inputs)?;
        assert_eq!(outputs[1], 1.3 * 1.84 * f64::powf(REFERENCE[3], 0.36));
        Ok(())
    }

    #[test]
    fn test_standstill() {
        let mut inputs = REFERENCE;
        inputs[5] = 0.0;
        assert!(Motor.compute(&inputs).is_err_and(|e| e
            == Error::domain("Division by zero.").with_variable("K_T")));
    }

    #[test]
    fn test_zero_torque_constant() {
        let mut inputs = REFERENCE;
        inputs[2] = 0.0;
        assert!(Motor.compute(&inputs).is_err_and(|e| e
            == Error::domain("Division by zero.").with_variable("I_mot_hov")));
    }

    #[test]
    fn test_negative_propeller_power() {
        let mut inputs = REFERENCE;
        inputs[3] = -10.0;
        assert!(Motor
            .compute(&inputs)
            .is_err_and(|e| e.is_domain() && e.variable() == Some("U_bat")));
    }

    #[test]
    fn test_derivatives() {
        assert_matches_central_differences(&Motor, &REFERENCE);
    }
}
