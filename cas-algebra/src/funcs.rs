//! Numeric evaluators attached to function nodes.
//!
//! A function node stores its name and a small [`EvalId`] rather than a raw function pointer.
//! The id indexes a process-wide registry that is seeded with the [`BUILTINS`] and can be
//! extended with [`register`]. Registration is append-only, so an id stays valid for the lifetime
//! of the process.

use cas_error::Error;
use crate::error::UnknownFunction;
use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::sync::{PoisonError, RwLock};

/// A numeric evaluation rule for a function of one or two real arguments.
#[derive(Debug, Clone, Copy)]
pub enum Evaluator {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

impl Evaluator {
    /// The number of arguments the evaluator accepts.
    pub fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }

    /// Applies the evaluator to the given arguments. Returns [`None`] if the number of arguments
    /// does not match the arity.
    pub fn apply(&self, args: &[f64]) -> Option<f64> {
        match (self, args) {
            (Self::Unary(f), [x]) => Some(f(*x)),
            (Self::Binary(f), [x, y]) => Some(f(*x, *y)),
            _ => None,
        }
    }

    /// Returns true if both evaluators call the same function.
    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unary(f), Self::Unary(g)) => *f as usize == *g as usize,
            (Self::Binary(f), Self::Binary(g)) => *f as usize == *g as usize,
            _ => false,
        }
    }
}

/// Identifies an [`Evaluator`] in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvalId(pub(crate) u32);

impl EvalId {
    /// Returns the raw index of the evaluator.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// The builtin functions, in registry order.
pub const BUILTINS: &[(&str, Evaluator)] = &[
    ("sin", Evaluator::Unary(f64::sin)),
    ("cos", Evaluator::Unary(f64::cos)),
    ("tan", Evaluator::Unary(f64::tan)),
    ("asin", Evaluator::Unary(f64::asin)),
    ("acos", Evaluator::Unary(f64::acos)),
    ("atan", Evaluator::Unary(f64::atan)),
    ("sinh", Evaluator::Unary(f64::sinh)),
    ("cosh", Evaluator::Unary(f64::cosh)),
    ("tanh", Evaluator::Unary(f64::tanh)),
    ("exp", Evaluator::Unary(f64::exp)),
    ("log", Evaluator::Unary(f64::ln)),
    ("sqrt", Evaluator::Unary(f64::sqrt)),
    ("abs", Evaluator::Unary(f64::abs)),
    ("atan2", Evaluator::Binary(f64::atan2)),
    ("pow", Evaluator::Binary(f64::powf)),
];

static REGISTRY: Lazy<RwLock<Vec<Evaluator>>> = Lazy::new(|| {
    RwLock::new(BUILTINS.iter().map(|(_, eval)| *eval).collect())
});

/// A builtin function resolved by name.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    /// The name of the function.
    pub name: &'static str,

    /// The registry id of its evaluator.
    pub id: EvalId,

    /// The evaluator itself.
    pub eval: Evaluator,
}

/// Looks up a builtin function by name.
///
/// If no builtin has that name, the error lists the builtins with the closest names.
pub fn builtin(name: &str) -> Result<Builtin, Error> {
    BUILTINS.iter()
        .position(|(builtin, _)| *builtin == name)
        .map(|index| {
            let (name, eval) = BUILTINS[index];
            Builtin { name, id: EvalId(index as u32), eval }
        })
        .ok_or_else(|| {
            UnknownFunction {
                name: name.to_string(),
                suggestions: suggestions(name),
            }.into()
        })
}

/// Returns the names of builtins that are one edit away from `name`.
fn suggestions(name: &str) -> Vec<&'static str> {
    BUILTINS.iter()
        .map(|(builtin, _)| *builtin)
        .filter(|builtin| levenshtein(builtin, name) < 2)
        .collect()
}

/// Registers a custom evaluator, returning its id. Registering the same function twice returns
/// the id of the first registration.
pub fn register(eval: Evaluator) -> EvalId {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(index) = registry.iter().position(|existing| existing.same_as(&eval)) {
        return EvalId(index as u32);
    }

    registry.push(eval);
    EvalId((registry.len() - 1) as u32)
}

/// Returns the evaluator with the given id.
pub fn evaluator(id: EvalId) -> Option<Evaluator> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    registry.get(id.0 as usize).copied()
}
