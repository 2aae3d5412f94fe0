// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Unit` enum, which represents the physical unit of
//! a variable.
//!
//! Units are only ever compared for identity.  Values are expected to already
//! be expressed in the declared unit.

use std::fmt::Display;

/// Represents the physical unit of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Dimensionless,
    Kilogram,
    Meter,
    MeterPerSecond,
    MeterPerSecondSquared,
    Newton,
    NewtonMeter,
    Watt,
    Volt,
    Ampere,
    AmpereSecond,
    Joule,
    Ohm,
    Pascal,
    KilogramPerCubicMeter,
    Hertz,
    Radian,
    RadianPerSecond,
    NewtonMeterPerAmpere,
    Minute,
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Dimensionless => write!(f, "-"),
            Unit::Kilogram => write!(f, "kg"),
            Unit::Meter => write!(f, "m"),
            Unit::MeterPerSecond => write!(f, "m/s"),
            Unit::MeterPerSecondSquared => write!(f, "m/s**2"),
            Unit::Newton => write!(f, "N"),
            Unit::NewtonMeter => write!(f, "N*m"),
            Unit::Watt => write!(f, "W"),
            Unit::Volt => write!(f, "V"),
            Unit::Ampere => write!(f, "A"),
            Unit::AmpereSecond => write!(f, "A*s"),
            Unit::Joule => write!(f, "J"),
            Unit::Ohm => write!(f, "ohm"),
            Unit::Pascal => write!(f, "Pa"),
            Unit::KilogramPerCubicMeter => write!(f, "kg/m**3"),
            Unit::Hertz => write!(f, "Hz"),
            Unit::Radian => write!(f, "rad"),
            Unit::RadianPerSecond => write!(f, "rad/s"),
            Unit::NewtonMeterPerAmpere => write!(f, "N*m/A"),
            Unit::Minute => write!(f, "min"),
        }
    }
}

/// A named scalar quantity with a unit.
///
/// Components declare their inputs and outputs as `Variable`s, and the
/// names and units form the contract between producers and consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    pub name: &'static str,
    pub unit: Unit,
}

impl Variable {
    /// Creates a new `Variable` with the given name and unit.
    pub const fn new(name: &'static str, unit: Unit) -> Self {
        Self { name, unit }
    }

    /// Creates a new dimensionless `Variable` with the given name.
    pub const fn dimensionless(name: &'static str) -> Self {
        Self::new(name, Unit::Dimensionless)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.unit)
    }
}
