// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Propeller selection from the takeoff thrust, and its aerodynamic
//! performance in hover and at takeoff.

use std::f64::consts::PI;

use crate::{
    checked_div, checked_powf, checked_sqrt, ensure_positive, unpack, Component, Error, Scalar,
    Unit, Variable,
};

const INPUTS: &[Variable] = &[
    Variable::dimensionless("beta_pro"),
    Variable::new("F_pro_to", Unit::Newton),
    Variable::new("rho_air", Unit::KilogramPerCubicMeter),
    Variable::new("ND_max", Unit::MeterPerSecond),
    Variable::dimensionless("k_ND"),
    Variable::new("M_pro_ref", Unit::Kilogram),
    Variable::new("D_pro_ref", Unit::Meter),
    Variable::new("F_pro_hov", Unit::Newton),
];

const OUTPUTS: &[Variable] = &[
    Variable::dimensionless("C_t"),
    Variable::dimensionless("C_p"),
    Variable::new("D_pro", Unit::Meter),
    Variable::new("n_pro_to", Unit::Hertz),
    Variable::new("Omega_pro_to", Unit::RadianPerSecond),
    Variable::new("M_pro", Unit::Kilogram),
    Variable::new("P_pro_to", Unit::Watt),
    Variable::new("T_pro_to", Unit::NewtonMeter),
    Variable::new("n_pro_hov", Unit::Hertz),
    Variable::new("Omega_pro_hov", Unit::RadianPerSecond),
    Variable::new("P_pro_hov", Unit::Watt),
    Variable::new("T_pro_hov", Unit::NewtonMeter),
];

/// Sizes the propeller diameter so that the takeoff thrust is reached at the
/// maximum allowed `ND` product, reduced by the margin `k_ND`.
///
/// Thrust and power coefficients follow `T = C_t·rho·n²·D⁴` and
/// `P = C_p·rho·n³·D⁵`, with both coefficients affine in the blade pitch.
#[derive(Clone, Copy, Debug, Default)]
pub struct Propeller;

impl Component for Propeller {
    fn name(&self) -> &str {
        "Propeller"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [
            beta_pro,
            f_pro_to,
            rho_air,
            nd_max,
            k_nd,
            m_pro_ref,
            d_pro_ref,
            f_pro_hov,
        ] = unpack(self, inputs)?;

        let c_t = beta_pro * 1.44e-01 + 4.27e-02;
        let c_p = beta_pro * 9.72e-02 - 1.48e-03;
        ensure_positive(c_t, "C_t")?;

        // Takeoff
        let nd = checked_div(nd_max, k_nd, "D_pro")?;
        let d_pro = checked_sqrt(
            checked_div(f_pro_to, c_t * rho_air * nd.powi(2), "D_pro")?,
            "D_pro",
        )?;
        let n_pro_to = checked_div(nd, d_pro, "n_pro_to")?;
        let omega_pro_to = n_pro_to * (2.0 * PI);

        let m_pro = m_pro_ref * checked_powf(checked_div(d_pro, d_pro_ref, "M_pro")?, 2.0, "M_pro")?;

        let p_pro_to = c_p * rho_air * n_pro_to.powi(3) * d_pro.powi(5);
        let t_pro_to = checked_div(p_pro_to, omega_pro_to, "T_pro_to")?;

        // Hover
        let n_pro_hov = checked_sqrt(
            checked_div(f_pro_hov, c_t * rho_air * d_pro.powi(4), "n_pro_hov")?,
            "n_pro_hov",
        )?;
        let omega_pro_hov = n_pro_hov * (2.0 * PI);
        let p_pro_hov = c_p * rho_air * n_pro_hov.powi(3) * d_pro.powi(5);
        let t_pro_hov = checked_div(p_pro_hov, omega_pro_hov, "T_pro_hov")?;

        Ok(vec![
            c_t,
            c_p,
            d_pro,
            n_pro_to,
            omega_pro_to,
            m_pro,
            p_pro_to,
            t_pro_to,
            n_pro_hov,
            omega_pro_hov,
            p_pro_hov,
            t_pro_hov,
        ])
    }
}
