//! Typed result of a facade call that depends on an optional module.

use mdaguard_core::types::GuardModule;

/// Either the module's answer, or a note that the guard was built without it.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutcome<T> {
    /// The module ran and produced a value.
    Available(T),
    /// The guard has no such module.
    Unavailable(GuardModule),
}

impl<T> ModuleOutcome<T> {
    /// Returns true if the module ran.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Returns true if the module is absent.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// The module's value, discarding which module was missing.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    /// Borrow the module's value.
    pub fn as_available_ref(&self) -> ModuleOutcome<&T> {
        match self {
            Self::Available(value) => ModuleOutcome::Available(value),
            Self::Unavailable(module) => ModuleOutcome::Unavailable(*module),
        }
    }

    /// Maps the module's value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ModuleOutcome<U> {
        match self {
            Self::Available(value) => ModuleOutcome::Available(f(value)),
            Self::Unavailable(module) => ModuleOutcome::Unavailable(module),
        }
    }

    /// The missing module, if any.
    pub fn missing_module(&self) -> Option<GuardModule> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable(module) => Some(*module),
        }
    }
}

impl ModuleOutcome<bool> {
    /// Collapses to a plain answer: an absent module never says yes.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Available(true))
    }
}
