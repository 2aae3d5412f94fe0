// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The drivetrain sizing models of a multirotor.
//!
//! The eight components below are assembled into a [`SizingGraph`] by
//! [`graph`], with the data flowing
//! `Scenario -> Propeller -> {Frame, Motor} -> {Battery, ESC} -> Objectives -> Constraints`.
//!
//! The graph has no feedback loops.  The assumed total mass `M_total` that the
//! thrust is sized for, and the real total mass `M_total_real` of the sized
//! components, are reconciled by the optimizer through the residual `cons_1`.

mod battery;
mod constraints;
mod esc;
mod frame;
mod motor;
mod objectives;
mod propeller;
mod scenario;

pub use battery::{Battery, DEPTH_OF_DISCHARGE, POWERTRAIN_EFFICIENCY};
pub use constraints::Constraints;
pub use esc::Esc;
pub use frame::Frame;
pub use motor::Motor;
pub use objectives::Objectives;
pub use propeller::Propeller;
pub use scenario::Scenario;

use crate::{
    checked_powf, Bounds, DesignVector, Error, Node, Objective, Scalar, SizingGraph,
    SizingGraphConfig, SizingProblem, Unit, Variable,
};

/// Standard gravity in m/s².
pub const GRAVITY: f64 = 9.81;

/// The inputs of the multirotor components that no component produces.
pub const DESIGN_VARIABLES: &[Variable] = &[
    // Scenario
    Variable::dimensionless("k_os"),
    Variable::new("M_pay", Unit::Kilogram),
    Variable::dimensionless("N_pro_arm"),
    Variable::dimensionless("N_arm"),
    Variable::new("a_to", Unit::MeterPerSecondSquared),
    // Propeller
    Variable::dimensionless("beta_pro"),
    Variable::new("rho_air", Unit::KilogramPerCubicMeter),
    Variable::new("ND_max", Unit::MeterPerSecond),
    Variable::dimensionless("k_ND"),
    Variable::new("M_pro_ref", Unit::Kilogram),
    Variable::new("D_pro_ref", Unit::Meter),
    // Frame
    Variable::new("sigma_max", Unit::Pascal),
    Variable::dimensionless("k_D"),
    Variable::new("rho_s", Unit::KilogramPerCubicMeter),
    // Motor
    Variable::dimensionless("k_mot"),
    Variable::dimensionless("k_vb"),
    Variable::dimensionless("k_speed_mot"),
    Variable::new("M_mot_ref", Unit::Kilogram),
    Variable::new("T_nom_mot_ref", Unit::NewtonMeter),
    Variable::new("R_mot_ref", Unit::Ohm),
    Variable::new("K_T_ref", Unit::NewtonMeterPerAmpere),
    Variable::new("T_mot_fr_ref", Unit::NewtonMeter),
    Variable::new("T_max_mot_ref", Unit::NewtonMeter),
    // Battery
    Variable::dimensionless("k_mb"),
    Variable::new("E_bat_ref", Unit::Joule),
    Variable::new("M_bat_ref", Unit::Kilogram),
    Variable::new("I_bat_max_ref", Unit::Ampere),
    Variable::new("C_bat_ref", Unit::AmpereSecond),
    // ESC
    Variable::new("M_esc_ref", Unit::Kilogram),
    Variable::new("P_esc_ref", Unit::Watt),
    // Requirements
    Variable::new("t_hov_spec", Unit::Minute),
    Variable::new("MTOW", Unit::Kilogram),
];

/// The feasibility residuals produced by [`Constraints`], in order.
pub const CONSTRAINTS: [&str; 7] = [
    "cons_1", "cons_2", "cons_3", "cons_4", "cons_5", "cons_6", "cons_7",
];

/// Empirical fit of the voltage a drivetrain of the given power is built for,
/// scaled by `margin`.
pub(crate) fn estimate_voltage<T: Scalar>(margin: T, power: T, variable: &str) -> Result<T, Error> {
    Ok(margin * 1.84 * checked_powf(power, 0.36, variable)?)
}

/// Assembles the multirotor sizing graph.
pub fn graph(config: SizingGraphConfig) -> Result<SizingGraph, Error> {
    let components: Vec<Box<dyn Node>> = vec![
        Box::new(Scenario),
        Box::new(Propeller),
        Box::new(Frame),
        Box::new(Motor),
        Box::new(Battery),
        Box::new(Esc),
        Box::new(Objectives),
        Box::new(Constraints),
    ];
    SizingGraph::try_new(components, DESIGN_VARIABLES.iter().copied(), config)
}

/// Builds the multirotor sizing problem: minimize the real total mass,
/// subject to the seven feasibility residuals, by changing the sizing
/// coefficients.
pub fn problem() -> Result<SizingProblem, Error> {
    SizingProblem::try_new(
        graph(SizingGraphConfig::default())?,
        Objective::Minimize("M_total_real"),
        CONSTRAINTS,
        [
            ("k_os", Bounds::new(1.0, 10.0)?),
            ("k_ND", Bounds::new(1.0, 10.0)?),
            ("beta_pro", Bounds::new(0.3, 0.6)?),
            ("k_D", Bounds::new(0.01, 0.99)?),
            ("k_mot", Bounds::new(1.0, 10.0)?),
            ("k_speed_mot", Bounds::new(1.0, 10.0)?),
            ("k_vb", Bounds::new(1.0, 5.0)?),
            ("k_mb", Bounds::new(0.1, 10.0)?),
        ],
    )
}

/// Returns a design point for a quadrotor carrying 4 kg, with reference
/// components taken from catalogs: an 11 inch propeller, a carbon fiber
/// frame, a 2.32 N·m motor, a 6S 220 Wh/kg battery and a 3108 W speed
/// controller.
pub fn reference_design() -> DesignVector {
    [
        ("k_os", 3.2),
        ("M_pay", 4.0),
        ("N_pro_arm", 1.0),
        ("N_arm", 4.0),
        ("a_to", 0.25 * GRAVITY),
        ("beta_pro", 0.33),
        ("rho_air", 1.18),
        ("ND_max", 105000.0 / 60.0 * 0.0254),
        ("k_ND", 1.2),
        ("M_pro_ref", 0.014),
        ("D_pro_ref", 11.0 * 0.0254),
        ("sigma_max", 280e6 / 4.0),
        ("k_D", 0.9),
        ("rho_s", 1700.0),
        ("k_mot", 1.0),
        ("k_vb", 1.0),
        ("k_speed_mot", 1.2),
        ("M_mot_ref", 0.575),
        ("T_nom_mot_ref", 2.32),
        ("R_mot_ref", 0.03),
        ("K_T_ref", 0.03),
        ("T_mot_fr_ref", 0.03),
        ("T_max_mot_ref", 85.0 / 70.0 * 2.32),
        ("k_mb", 1.0),
        ("E_bat_ref", 220.0 * 3600.0 * 0.329),
        ("M_bat_ref", 0.329),
        ("I_bat_max_ref", 250.0),
        ("C_bat_ref", 5.0 * 3600.0),
        ("M_esc_ref", 0.115),
        ("P_esc_ref", 3108.0),
        ("t_hov_spec", 25.0),
        ("MTOW", 15.0),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}
