//! Prenex-CNF formula model.
//!
//! A [`Qbf`] is a quantifier prefix over integer variables followed by a
//! conjunction of clauses. The model is a plain accumulator: generators
//! append blocks and clauses in order, serializers borrow the finished value.
//! Prenex discipline (every clause variable bound by exactly one block) is
//! the generator's obligation; the model does not check it.

use std::fmt;

use crate::types::{Lit, Quantifier, Var};

/// One block of the quantifier prefix.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct QuantifierBlock {
    pub quantifier: Quantifier,
    pub variables: Vec<Var>,
}

/// A QBF in prenex conjunctive normal form.
///
/// `variable_count` and `clause_count` are *declared* sizes: they are fixed
/// up front (they go into the QDIMACS problem line) and must match the actual
/// content once generation completes. Clauses discovered during an expansion
/// pass go through [`Qbf::add_new_clause`], which keeps the declared count in
/// step.
#[derive(Debug, Clone)]
pub struct Qbf {
    variable_count: u32,
    clause_count: u64,
    prefix: Vec<QuantifierBlock>,
    clauses: Vec<Vec<Lit>>,
    name: String,
}

impl Qbf {
    /// Creates an empty formula with declared sizes and a name.
    ///
    /// The name identifies the instance and drives default output file names.
    pub fn new(variable_count: u32, clause_count: u64, name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!(
            "Creating QBF '{}' with {} variables and {} clauses declared",
            name,
            variable_count,
            clause_count
        );
        Self {
            variable_count,
            clause_count,
            prefix: Vec::new(),
            clauses: Vec::new(),
            name,
        }
    }

    pub fn variable_count(&self) -> u32 {
        self.variable_count
    }

    pub fn clause_count(&self) -> u64 {
        self.clause_count
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &[QuantifierBlock] {
        &self.prefix
    }

    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    /// Appends a quantifier block.
    ///
    /// Blocks are kept exactly as given: no deduplication, no validation
    /// against the declared variable count.
    pub fn add_quantifier_block(
        &mut self,
        quantifier: Quantifier,
        variables: impl IntoIterator<Item = Var>,
    ) {
        self.prefix.push(QuantifierBlock {
            quantifier,
            variables: variables.into_iter().collect(),
        });
    }

    /// Appends a clause that was accounted for in the declared clause count.
    ///
    /// # Panics
    ///
    /// Panics if the clause is empty.
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = Lit>) {
        let clause: Vec<Lit> = literals.into_iter().collect();
        assert!(!clause.is_empty(), "Clauses must be non-empty");
        self.clauses.push(clause);
    }

    /// Appends a clause discovered after the declared count was fixed, and
    /// increments the declared count along with it.
    ///
    /// # Panics
    ///
    /// Panics if the clause is empty.
    pub fn add_new_clause(&mut self, literals: impl IntoIterator<Item = Lit>) {
        self.add_clause(literals);
        self.clause_count += 1;
    }
}

/// Human-readable rendering for interactive inspection. Not a wire format;
/// solvers consume the QDIMACS serialization instead.
impl fmt::Display for Qbf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Variables: {}", self.variable_count)?;
        writeln!(f, "Clauses: {}", self.clause_count)?;
        for block in &self.prefix {
            write!(f, "{}", block.quantifier)?;
            for (i, var) in block.variables.iter().enumerate() {
                let sep = if i == 0 { "" } else { "," };
                write!(f, "{} {}", sep, var.id())?;
            }
            writeln!(f)?;
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            write!(f, "(")?;
            for (j, lit) in clause.iter().enumerate() {
                if j > 0 {
                    write!(f, " ∨ ")?;
                }
                if lit.is_negated() {
                    write!(f, "¬")?;
                }
                write!(f, "{}", lit.var().id())?;
            }
            write!(f, ")")?;
            if i + 1 < self.clauses.len() {
                write!(f, " ∧")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
