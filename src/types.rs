//! Type-safe wrappers for QBF variables, literals, and quantifiers.
//!
//! This module provides newtype wrappers that enforce compile-time distinction
//! between variable IDs and signed literals, preventing common sign-handling
//! mistakes in formula construction code.

use std::fmt;
use std::ops::Neg;

/// A variable identifier (1-indexed).
///
/// Variables are the flat integer names used in QDIMACS output. Generators
/// produce them through the variable encoder, so IDs are dense within
/// `[1, variable_count]` for a finished formula.
///
/// # Invariants
///
/// - Variable IDs must be >= 1 (0 is the DIMACS line terminator)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0`. Variables must be 1-indexed.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable IDs must be >= 1");
        Var(id)
    }

    /// Returns the raw variable ID as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Returns the positive literal over this variable.
    pub fn pos(self) -> Lit {
        Lit(self.0 as i32)
    }

    /// Returns the negative literal over this variable.
    pub fn neg(self) -> Lit {
        Lit(-(self.0 as i32))
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A signed literal over a [`Var`], in DIMACS convention.
///
/// The wrapped integer is the DIMACS encoding: `3` is the positive literal
/// over variable 3, `-3` the negative one. Zero is not a literal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit(i32);

impl Lit {
    /// Creates a literal from its DIMACS encoding.
    ///
    /// # Panics
    ///
    /// Panics if `value == 0`.
    pub fn from_dimacs(value: i32) -> Self {
        assert_ne!(value, 0, "Literals must be nonzero");
        Lit(value)
    }

    /// Returns the DIMACS encoding of the literal.
    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    /// Returns the variable under the literal.
    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negated(self) -> bool {
        self.0 < 0
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.0
    }
}

/// A quantifier, as attached to a prefix block.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Quantifier {
    Exists,
    Forall,
}

impl Quantifier {
    /// Returns the QDIMACS block prefix (`e` or `a`).
    pub fn qdimacs_token(self) -> char {
        match self {
            Quantifier::Exists => 'e',
            Quantifier::Forall => 'a',
        }
    }

    /// Returns the QCIR block keyword (`exists` or `forall`).
    pub fn qcir_keyword(self) -> &'static str {
        match self {
            Quantifier::Exists => "exists",
            Quantifier::Forall => "forall",
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Quantifier::Exists => '∃',
            Quantifier::Forall => '∀',
        };
        write!(f, "{}", symbol)
    }
}
