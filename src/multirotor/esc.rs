// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Electronic speed controller selection from the motor takeoff power.

use crate::{checked_div, unpack, Component, Error, Scalar, Unit, Variable};

use super::estimate_voltage;

const INPUTS: &[Variable] = &[
    Variable::new("P_el_mot_to", Unit::Watt),
    Variable::new("U_bat", Unit::Volt),
    Variable::new("U_mot_to", Unit::Volt),
    Variable::new("M_esc_ref", Unit::Kilogram),
    Variable::new("P_esc_ref", Unit::Watt),
];

const OUTPUTS: &[Variable] = &[
    Variable::new("P_esc", Unit::Watt),
    Variable::new("U_esc", Unit::Volt),
    Variable::new("M_esc", Unit::Kilogram),
];

/// Sizes the speed controller on the power it has to switch at the bus
/// voltage, and scales its mass linearly from a reference controller.
#[derive(Clone, Copy, Debug, Default)]
pub struct Esc;

impl Component for Esc {
    fn name(&self) -> &str {
        "ESC"
    }

    fn inputs(&self) -> &[Variable] {
        INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        OUTPUTS
    }

    fn compute<T: Scalar>(&self, inputs: &[T]) -> Result<Vec<T>, Error> {
        let [p_el_mot_to, u_bat, u_mot_to, m_esc_ref, p_esc_ref] = unpack(self, inputs)?;

        let p_esc = checked_div(p_el_mot_to * u_bat, u_mot_to, "P_esc")?;
        let u_esc = estimate_voltage(T::from_real(1.0), p_esc, "U_esc")?;
        let m_esc = m_esc_ref * checked_div(p_esc, p_esc_ref, "M_esc")?;

        Ok(vec![p_esc, u_esc, m_esc])
    }
}
