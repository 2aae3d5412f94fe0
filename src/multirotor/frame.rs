// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Frame selection: arm geometry from the propeller size, arm tubes from the
//! takeoff bending load, and the resulting frame mass.

use std::f64::consts::PI;

use crate::{checked_div, checked_powf, unpack, Component, Error, Scalar, Unit, Variable};

const INPUTS: &[Variable] = &[
    Variable::dimensionless("N_arm"),
    Variable::new("D_pro", Unit::Meter),
    Variable::new("F_pro_to", Unit::Newton),
    Variable::dimensionless("N_pro_arm"),
    Variable::new("sigma_max", Unit::Pascal),
    Variable::dimensionless("k_D"),
    Variable::new("rho_s", Unit::KilogramPerCubicMeter),
];

const OUTPUTS: &[Variable] = &[
    Variable::new("alpha_sep", Unit::Radian),
    Variable::new("L_arm", Unit::Meter),
    Variable::new("D_out_arm", Unit::Meter),
    Variable::new("D_in_arm", Unit::Meter),
    Variable::new("M_arms", Unit::Kilogram),
    Variable::new("M_body", Unit::Kilogram),
    Variable::new("M_frame", Unit::Kilogram),
];

/// The arms are hollow tubes, long enough for neighboring propellers not to
/// overlap, and thick enough to carry the takeoff thrust of their propellers
/// at the maximum material stress.  The body weighs 1.5 times the arms.
#[derive(Clone, Copy, Debug, Default)]
pub struct Frame;

impl Component for Frame {
    fn name(&self) -> &str {
        "Frame"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [n_arm, d_pro, f_pro_to, n_pro_arm, sigma_max, k_d, rho_s] = unpack(self, inputs)?;

        let alpha_sep = checked_div(T::from_real(2.0 * PI), n_arm, "alpha_sep")?;
        let l_arm = checked_div(d_pro, (alpha_sep / 2.0).sin() * 2.0, "L_arm")?;

        // Bending stress at the root of a hollow tube: sigma = 32·M / (pi·D³·(1 - k_D⁴))
        let hollowness = T::from_real(1.0) - k_d.powi(4);
        let d_out_arm = checked_powf(
            checked_div(
                f_pro_to * n_pro_arm * l_arm * 32.0,
                sigma_max * PI * hollowness,
                "D_out_arm",
            )?,
            1.0 / 3.0,
            "D_out_arm",
        )?;
        let d_in_arm = k_d * d_out_arm;

        let m_arms =
            (d_out_arm.powi(2) - (k_d * d_out_arm).powi(2)) * (PI / 4.0) * l_arm * rho_s * n_arm;
        let m_body = m_arms * 1.5;
        let m_frame = m_body + m_arms;

        Ok(vec![
            alpha_sep, l_arm, d_out_arm, d_in_arm, m_arms, m_body, m_frame,
        ])
    }
}
