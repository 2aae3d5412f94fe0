// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The arithmetic that component relations are written in.
//!
//! Every relation is generic over [`Scalar`], so that the same code can be
//! evaluated with real numbers to get values, and with complex numbers to
//! get complex-step derivatives.
//!
//! The `checked_*` helpers guard the operations that can leave the
//! mathematical domain.  They decide on the real part only, so that a real
//! evaluation and all of its complex-step perturbations take the same
//! branches.

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::Error;

/// A real or complex scalar that component relations can be evaluated with.
pub trait Scalar:
    Copy
    + std::fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Lifts a real number into the scalar type.
    fn from_real(value: f64) -> Self;

    /// Returns the real part of the scalar.
    fn re(self) -> f64;

    /// Raises the scalar to a real power.
    fn powf(self, exp: f64) -> Self;

    /// Raises the scalar to an integer power.
    fn powi(self, exp: i32) -> Self;

    /// Returns the principal square root of the scalar.
    fn sqrt(self) -> Self;

    /// Returns the sine of the scalar.
    fn sin(self) -> Self;
}

impl Scalar for f64 {
    fn from_real(value: f64) -> Self {
        value
    }

    fn re(self) -> f64 {
        self
    }

    fn powf(self, exp: f64) -> Self {
        f64::powf(self, exp)
    }

    fn powi(self, exp: i32) -> Self {
        f64::powi(self, exp)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }
}

impl Scalar for Complex64 {
    fn from_real(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }

    fn re(self) -> f64 {
        self.re
    }

    fn powf(self, exp: f64) -> Self {
        Complex64::powf(self, exp)
    }

    fn powi(self, exp: i32) -> Self {
        Complex64::powi(&self, exp)
    }

    fn sqrt(self) -> Self {
        Complex64::sqrt(self)
    }

    fn sin(self) -> Self {
        Complex64::sin(self)
    }
}

/// Divides `num` by `den`, failing if `den` is zero.
pub fn checked_div<T: Scalar>(num: T, den: T, variable: &str) -> Result<T, Error> {
    if den.re() == 0.0 {
        return Err(Error::domain("Division by zero.").with_variable(variable));
    }
    Ok(num / den)
}

/// Takes the square root of `radicand`, failing if it is not positive.
pub fn checked_sqrt<T: Scalar>(radicand: T, variable: &str) -> Result<T, Error> {
    if radicand.re() <= 0.0 {
        return Err(Error::domain(format!(
            "Square root of a non-positive number: {}.",
            radicand.re()
        ))
        .with_variable(variable));
    }
    Ok(radicand.sqrt())
}

/// Raises `base` to the power `exp`.
///
/// Integer exponents are computed by repeated multiplication and only fail
/// when a zero base is raised to a negative power.  Fractional exponents
/// require a positive base.
pub fn checked_powf<T: Scalar>(base: T, exp: f64, variable: &str) -> Result<T, Error> {
    if exp.fract() == 0.0 && exp.abs() <= f64::from(i32::MAX) {
        if exp < 0.0 && base.re() == 0.0 {
            return Err(Error::domain(format!("Zero raised to negative power {exp}."))
                .with_variable(variable));
        }
        return Ok(base.powi(exp as i32));
    }
    if base.re() <= 0.0 {
        return Err(Error::domain(format!(
            "Non-positive base {} raised to fractional power {exp}.",
            base.re()
        ))
        .with_variable(variable));
    }
    Ok(base.powf(exp))
}

/// Fails unless `value` is strictly positive.
pub fn ensure_positive<T: Scalar>(value: T, variable: &str) -> Result<(), Error> {
    if value.re() <= 0.0 {
        return Err(
            Error::domain(format!("Expected a positive value, got {}.", value.re()))
                .with_variable(variable),
        );
    }
    Ok(())
}
