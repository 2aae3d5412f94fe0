// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Error` struct and the `ErrorKind` enum, which are
//! used to represent errors that can occur in the library.

/// A macro for defining the `ErrorKind` enum, the `Display` implementation for
/// it, and the constructors for the `Error` struct.
macro_rules! ErrorKind {
    ($(
        ($kind:ident, $ctor:ident)
    ),*) => {
        /// The kind of error that occurred.
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub enum ErrorKind {
            $(
                $kind,
            )*
        }

        impl std::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$kind => write!(f, "{}", stringify!($kind)),
                    )*
                }
            }
        }

        /// Constructors for [`Error`].
        impl Error {
            $(
                #[doc = concat!(
                    "Creates a new [`Error`] with the `",
                    stringify!($kind),
                    "` kind and the given description."
                )]
                pub(crate) fn $ctor(desc: impl Into<String>) -> crate::Error {
                    Self {
                        kind: ErrorKind::$kind,
                        desc: desc.into(),
                        component: None,
                        variable: None,
                    }
                }
            )*
        }
    };
}

ErrorKind!(
    (ComponentNotFound, component_not_found),
    (Configuration, configuration),
    (Domain, domain),
    (Internal, internal),
    (MissingVariable, missing_variable),
    (UnknownVariable, unknown_variable),
    (VariableNotFound, variable_not_found)
);

/// An error that can occur during the assembly or evaluation of a
/// [SizingGraph][crate::SizingGraph].
///
/// Domain errors carry the name of the variable whose computation left the
/// mathematical domain, and the name of the component that was being
/// evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    desc: String,
    component: Option<String>,
    variable: Option<String>,
}

impl Error {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the description of the error.
    pub fn description(&self) -> &str {
        &self.desc
    }

    /// Returns the name of the component the error was raised in, if known.
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Returns the name of the offending variable, if known.
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    /// Returns true if the error was caused by a value leaving the
    /// mathematical domain of an operation.
    ///
    /// An optimizer should treat such errors as a signal that the design
    /// point is infeasible, rather than as a failure of the evaluation.
    pub fn is_domain(&self) -> bool {
        self.kind == ErrorKind::Domain
    }

    /// Tags the error with the name of the offending variable.
    pub(crate) fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Tags the error with the name of the component it was raised in, unless
    /// it is already tagged.
    pub(crate) fn in_component(mut self, component: impl Into<String>) -> Self {
        if self.component.is_none() {
            self.component = Some(component.into());
        }
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        match (&self.component, &self.variable) {
            (Some(component), Some(variable)) => write!(f, " in {component} ({variable})")?,
            (Some(component), None) => write!(f, " in {component}")?,
            (None, Some(variable)) => write!(f, " ({variable})")?,
            (None, None) => {}
        }
        write!(f, ": {}", self.desc)
    }
}

impl std::error::Error for Error {}
