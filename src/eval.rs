//! Exhaustive evaluation of formulas and circuits.
//!
//! These are the semantic cross-checks behind the generator tests: clause
//! matrix evaluation under a full assignment, circuit simulation, and full
//! quantifier expansion. Assignments are bit masks (bit `i-1` holds variable
//! `i` for formulas, bit `i` holds the `i`-th input in prefix order for
//! circuits), so everything here is capped at 64 variables. Debugging aids
//! for small instances, not a solver.
//!
//! # Examples
//!
//! ```
//! use qbfgen::formula::Qbf;
//! use qbfgen::types::{Lit, Quantifier, Var};
//!
//! // ∀x ∃y. (¬x ∨ y) ∧ (x ∨ ¬y)
//! let mut qbf = Qbf::new(2, 2, "equal");
//! qbf.add_quantifier_block(Quantifier::Forall, [Var::new(1)]);
//! qbf.add_quantifier_block(Quantifier::Exists, [Var::new(2)]);
//! qbf.add_clause([Lit::from_dimacs(-1), Lit::from_dimacs(2)]);
//! qbf.add_clause([Lit::from_dimacs(1), Lit::from_dimacs(-2)]);
//! assert!(qbf.decide());
//! ```

use crate::circuit::{GateOp, Qbc};
use crate::formula::Qbf;
use crate::reference::NodeRef;
use crate::types::{Lit, Quantifier};

fn lit_value(lit: Lit, assignment: u64) -> bool {
    let bit = (assignment >> (lit.var().id() - 1)) & 1 == 1;
    bit == lit.is_positive()
}

impl Qbf {
    /// Evaluates the quantifier-free clause matrix under a full assignment.
    ///
    /// Bit `i-1` of `assignment` is the value of variable `i`.
    ///
    /// # Panics
    ///
    /// Panics if the formula declares more than 64 variables.
    pub fn matrix_value(&self, assignment: u64) -> bool {
        assert!(
            self.variable_count() <= 64,
            "Matrix evaluation is capped at 64 variables"
        );
        self.clauses()
            .iter()
            .all(|clause| clause.iter().any(|&lit| lit_value(lit, assignment)))
    }

    /// Decides the quantified formula by expanding the prefix.
    ///
    /// Cost is exponential in the number of variables.
    ///
    /// # Panics
    ///
    /// Panics if the formula declares more than 64 variables, or if a clause
    /// mentions a variable no prefix block binds.
    pub fn decide(&self) -> bool {
        assert!(
            self.variable_count() <= 64,
            "Expansion is capped at 64 variables"
        );
        let order: Vec<(Quantifier, u32)> = self
            .prefix()
            .iter()
            .flat_map(|block| {
                block
                    .variables
                    .iter()
                    .map(move |var| (block.quantifier, var.id()))
            })
            .collect();

        let mut bound = 0u64;
        for &(_, id) in &order {
            bound |= 1 << (id - 1);
        }
        for clause in self.clauses() {
            for lit in clause {
                let id = lit.var().id();
                assert!(
                    bound >> (id - 1) & 1 == 1,
                    "Variable {} is not quantified",
                    id
                );
            }
        }

        fn expand(formula: &Qbf, order: &[(Quantifier, u32)], assignment: u64) -> bool {
            match order.split_first() {
                None => formula.matrix_value(assignment),
                Some((&(quantifier, id), rest)) => {
                    let bit = 1u64 << (id - 1);
                    let low = expand(formula, rest, assignment & !bit);
                    match quantifier {
                        Quantifier::Exists => low || expand(formula, rest, assignment | bit),
                        Quantifier::Forall => low && expand(formula, rest, assignment | bit),
                    }
                }
            }
        }
        expand(self, &order, 0)
    }
}

impl Qbc {
    /// Simulates the circuit and returns the value of every node, indexed by
    /// node position. Bit `i` of `inputs` is the `i`-th input in prefix order.
    ///
    /// # Panics
    ///
    /// Panics if the circuit binds more than 64 inputs.
    pub fn node_values(&self, inputs: u64) -> Vec<bool> {
        let mut values = vec![false; self.node_count()];
        let mut position = 0;
        for block in self.prefix() {
            for input in &block.inputs {
                assert!(position < 64, "Simulation is capped at 64 inputs");
                values[input.index()] = inputs >> position & 1 == 1;
                position += 1;
            }
        }
        for gate in self.gates() {
            let operand = |r: &NodeRef| values[r.id().index()] ^ r.is_negated();
            values[gate.id.index()] = match gate.op {
                GateOp::And => gate.operands.iter().all(operand),
                GateOp::Or => gate.operands.iter().any(operand),
            };
        }
        values
    }

    /// Evaluates the circuit output under an input assignment.
    ///
    /// # Panics
    ///
    /// Panics if the output gate has not been set, or if the circuit binds
    /// more than 64 inputs.
    pub fn value(&self, inputs: u64) -> bool {
        let output = self.output().expect("Output gate is not set");
        let values = self.node_values(inputs);
        values[output.id().index()] ^ output.is_negated()
    }

    /// Decides the quantified circuit by expanding over the inputs.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Qbc::value`].
    pub fn decide(&self) -> bool {
        let order: Vec<Quantifier> = self
            .prefix()
            .iter()
            .flat_map(|block| block.inputs.iter().map(move |_| block.quantifier))
            .collect();
        assert!(order.len() <= 64, "Expansion is capped at 64 inputs");

        fn expand(circuit: &Qbc, order: &[Quantifier], position: usize, inputs: u64) -> bool {
            match order.get(position) {
                None => circuit.value(inputs),
                Some(&quantifier) => {
                    let bit = 1u64 << position;
                    let low = expand(circuit, order, position + 1, inputs & !bit);
                    match quantifier {
                        Quantifier::Exists => {
                            low || expand(circuit, order, position + 1, inputs | bit)
                        }
                        Quantifier::Forall => {
                            low && expand(circuit, order, position + 1, inputs | bit)
                        }
                    }
                }
            }
        }
        expand(self, &order, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Var;

    use test_log::test;

    fn lit(value: i32) -> Lit {
        Lit::from_dimacs(value)
    }

    #[test]
    fn test_matrix_value() {
        let mut qbf = Qbf::new(2, 2, "matrix");
        qbf.add_clause([lit(1), lit(2)]);
        qbf.add_clause([lit(-1), lit(2)]);
        assert!(!qbf.matrix_value(0b00));
        assert!(!qbf.matrix_value(0b01));
        assert!(qbf.matrix_value(0b10));
        assert!(qbf.matrix_value(0b11));
    }

    #[test]
    fn test_decide_order_matters() {
        // ∀x ∃y. x ↔ y is true: y copies x.
        let mut copy = Qbf::new(2, 2, "copy");
        copy.add_quantifier_block(Quantifier::Forall, [Var::new(1)]);
        copy.add_quantifier_block(Quantifier::Exists, [Var::new(2)]);
        copy.add_clause([lit(-1), lit(2)]);
        copy.add_clause([lit(1), lit(-2)]);
        assert!(copy.decide());

        // ∃y ∀x. x ↔ y is false: y commits first.
        let mut guess = Qbf::new(2, 2, "guess");
        guess.add_quantifier_block(Quantifier::Exists, [Var::new(2)]);
        guess.add_quantifier_block(Quantifier::Forall, [Var::new(1)]);
        guess.add_clause([lit(-1), lit(2)]);
        guess.add_clause([lit(1), lit(-2)]);
        assert!(!guess.decide());
    }

    #[test]
    fn test_decide_degenerate() {
        let mut unit = Qbf::new(1, 1, "unit");
        unit.add_quantifier_block(Quantifier::Exists, [Var::new(1)]);
        unit.add_clause([lit(1)]);
        assert!(unit.decide());

        let mut contradiction = Qbf::new(1, 2, "contradiction");
        contradiction.add_quantifier_block(Quantifier::Exists, [Var::new(1)]);
        contradiction.add_clause([lit(1)]);
        contradiction.add_clause([lit(-1)]);
        assert!(!contradiction.decide());
    }

    #[test]
    #[should_panic(expected = "not quantified")]
    fn test_decide_unbound_variable_panics() {
        let mut qbf = Qbf::new(2, 1, "unbound");
        qbf.add_quantifier_block(Quantifier::Exists, [Var::new(1)]);
        qbf.add_clause([lit(2)]);
        qbf.decide();
    }

    fn and_not(name: &str) -> Qbc {
        let mut circuit = Qbc::new(2, 1, name);
        let x = circuit.add_quantifier_block(Quantifier::Exists, ["x"])[0];
        let y = circuit.add_quantifier_block(Quantifier::Forall, ["y"])[0];
        let g = circuit.add_gate("g", GateOp::And, [x.into(), -y]);
        circuit.set_output(g);
        circuit
    }

    fn negated_output() -> Qbc {
        let mut circuit = Qbc::new(2, 3, "negated");
        let x = circuit.add_quantifier_block(Quantifier::Forall, ["x"])[0];
        let y = circuit.add_quantifier_block(Quantifier::Exists, ["y"])[0];
        let same = circuit.add_gate("same", GateOp::And, [x.into(), y.into()]);
        let diff = circuit.add_gate("diff", GateOp::And, [-x, -y]);
        let equal = circuit.add_gate("equal", GateOp::Or, [same, diff]);
        circuit.set_output(-equal);
        circuit
    }

    #[test]
    fn test_circuit_value() {
        let circuit = and_not("value");
        // Bit 0 is x, bit 1 is y; the output is x ∧ ¬y.
        assert!(!circuit.value(0b00));
        assert!(circuit.value(0b01));
        assert!(!circuit.value(0b10));
        assert!(!circuit.value(0b11));
    }

    #[test]
    fn test_circuit_decide() {
        // ∃x ∀y. x ∧ ¬y is false: the universal player picks y = x.
        assert!(!and_not("game").decide());

        // ∃x ∀y. x ∨ ¬y is true: pick x.
        let mut either = Qbc::new(2, 1, "either");
        let x = either.add_quantifier_block(Quantifier::Exists, ["x"])[0];
        let y = either.add_quantifier_block(Quantifier::Forall, ["y"])[0];
        let g = either.add_gate("g", GateOp::Or, [x.into(), -y]);
        either.set_output(g);
        assert!(either.decide());

        // ∀x ∃y. ¬(x ↔ y) is true: y answers with the opposite of x.
        assert!(negated_output().decide());
    }

    #[test]
    fn test_lowering_preserves_verdict() {
        for circuit in [and_not("lowered"), negated_output()] {
            let qbf = circuit.to_qbf().unwrap();
            assert_eq!(circuit.decide(), qbf.decide(), "{}", circuit.name());
        }
    }

    #[test]
    fn test_node_values_follow_gates() {
        let circuit = and_not("nodes");
        let g = circuit.node("g").unwrap();
        assert!(circuit.node_values(0b01)[g.index()]);
        assert!(!circuit.node_values(0b11)[g.index()]);
    }
}
