//! Quantified Boolean circuit model and CNF lowering.
//!
//! A [`Qbc`] is a quantifier prefix binding symbolic input names plus a DAG
//! of named `and`/`or` gates ending in one output reference. Construction is
//! strictly bottom-up: blocks bind the inputs, every gate only references
//! nodes that already exist, the output is set once at the end. The gate
//! list is therefore a topological order by construction, which is what the
//! CNF lowering in [`Qbc::to_qbf`] relies on.
//!
//! Identifiers live in a per-instance symbol table; nothing is shared across
//! circuits, so independent instances can be built concurrently.
//!
//! # Examples
//!
//! ```
//! use qbfgen::circuit::{GateOp, Qbc};
//! use qbfgen::types::Quantifier;
//!
//! let mut circuit = Qbc::new(2, 1, "gadget");
//! let x = circuit.add_quantifier_block(Quantifier::Exists, ["x"])[0];
//! let y = circuit.add_quantifier_block(Quantifier::Forall, ["y"])[0];
//! let g = circuit.add_gate("g", GateOp::And, [x.into(), -y]);
//! circuit.set_output(g);
//!
//! let qbf = circuit.to_qbf().unwrap();
//! assert_eq!(qbf.variable_count(), 3);
//! ```

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::formula::Qbf;
use crate::reference::{NodeId, NodeRef};
use crate::types::{Lit, Quantifier, Var};

/// Gate operators supported by the circuit model.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateOp {
    And,
    Or,
}

impl GateOp {
    /// Returns the QCIR keyword (`and` or `or`).
    pub fn keyword(self) -> &'static str {
        match self {
            GateOp::And => "and",
            GateOp::Or => "or",
        }
    }

    fn symbol(self) -> char {
        match self {
            GateOp::And => '∧',
            GateOp::Or => '∨',
        }
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// One block of the circuit's quantifier prefix, binding input names.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InputBlock {
    pub quantifier: Quantifier,
    pub inputs: Vec<NodeId>,
}

/// A named gate over previously defined nodes.
#[derive(Debug, Clone)]
pub struct Gate {
    pub id: NodeId,
    pub op: GateOp,
    pub operands: Vec<NodeRef>,
}

/// Per-instance identifier table: interned names and the fresh-name counter.
#[derive(Debug, Default)]
struct SymbolTable {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    fresh: u32,
}

impl SymbolTable {
    fn lookup(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    fn name(&self, id: NodeId) -> &str {
        &self.names[id.index()]
    }

    /// Interns a name that is known to be unused and returns its handle.
    fn intern(&mut self, name: String) -> NodeId {
        let id = NodeId::new(self.names.len() as u32);
        self.index.insert(name.clone(), id);
        self.names.push(name);
        id
    }

    /// Synthesizes an unused `g<counter>` identifier, skipping over names a
    /// caller has already claimed.
    fn fresh_name(&mut self) -> String {
        loop {
            self.fresh += 1;
            let name = format!("g{}", self.fresh);
            if !self.index.contains_key(&name) {
                return name;
            }
        }
    }
}

/// Errors raised while lowering a circuit to CNF.
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("gate `{gate}` has {arity} operands; only 2 or 3 are supported")]
    UnsupportedArity { gate: String, arity: usize },
    #[error("circuit `{name}` has no output gate")]
    MissingOutput { name: String },
}

/// A quantified Boolean circuit.
///
/// `variable_count` and `gate_count` are declared sizes, fixed up front like
/// the [`Qbf`] counts; gates discovered during construction go through
/// [`Qbc::add_new_gate`] or [`Qbc::add_anon_gate`] to keep the declared
/// count in step.
#[derive(Debug)]
pub struct Qbc {
    variable_count: u32,
    gate_count: u64,
    prefix: Vec<InputBlock>,
    nodes: usize,
    gates: Vec<Gate>,
    output: Option<NodeRef>,
    symbols: SymbolTable,
    name: String,
}

impl Qbc {
    /// Creates an empty circuit with declared sizes and a name.
    pub fn new(variable_count: u32, gate_count: u64, name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!(
            "Creating QBC '{}' with {} variables and {} gates declared",
            name,
            variable_count,
            gate_count
        );
        Self {
            variable_count,
            gate_count,
            prefix: Vec::new(),
            nodes: 0,
            gates: Vec::new(),
            output: None,
            symbols: SymbolTable::default(),
            name,
        }
    }

    pub fn variable_count(&self) -> u32 {
        self.variable_count
    }

    pub fn gate_count(&self) -> u64 {
        self.gate_count
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &[InputBlock] {
        &self.prefix
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn output(&self) -> Option<NodeRef> {
        self.output
    }

    /// Total number of nodes (inputs plus gates) defined so far.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Returns the identifier behind a node handle.
    pub fn node_name(&self, id: NodeId) -> &str {
        self.symbols.name(id)
    }

    /// Looks up a node handle by identifier.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.symbols.lookup(name)
    }

    /// Appends a quantifier block binding fresh input names, and returns the
    /// handles in block order.
    ///
    /// # Panics
    ///
    /// Panics if any name is already in use.
    pub fn add_quantifier_block<S: Into<String>>(
        &mut self,
        quantifier: Quantifier,
        names: impl IntoIterator<Item = S>,
    ) -> Vec<NodeId> {
        let mut inputs = Vec::new();
        for name in names {
            let name = name.into();
            assert!(
                self.symbols.lookup(&name).is_none(),
                "Identifier `{}` is already in use",
                name
            );
            let id = self.symbols.intern(name);
            self.nodes += 1;
            inputs.push(id);
        }
        self.prefix.push(InputBlock { quantifier, inputs: inputs.clone() });
        inputs
    }

    /// Appends a gate that was accounted for in the declared gate count, and
    /// returns a positive reference to it.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is already in use, if the operand list is
    /// empty, or if an operand references a node this circuit never defined.
    pub fn add_gate(
        &mut self,
        name: impl Into<String>,
        op: GateOp,
        operands: impl IntoIterator<Item = NodeRef>,
    ) -> NodeRef {
        let name = name.into();
        assert!(
            self.symbols.lookup(&name).is_none(),
            "Identifier `{}` is already in use",
            name
        );
        let operands: Vec<NodeRef> = operands.into_iter().collect();
        assert!(!operands.is_empty(), "Gate `{}` has no operands", name);
        for operand in &operands {
            assert!(
                operand.id().index() < self.nodes,
                "Gate `{}` references undefined node index {}",
                name,
                operand.id().index()
            );
        }
        let id = self.symbols.intern(name);
        self.nodes += 1;
        self.gates.push(Gate { id, op, operands });
        NodeRef::positive(id)
    }

    /// Appends a gate discovered after the declared count was fixed, and
    /// increments the declared count along with it.
    pub fn add_new_gate(
        &mut self,
        name: impl Into<String>,
        op: GateOp,
        operands: impl IntoIterator<Item = NodeRef>,
    ) -> NodeRef {
        let gate = self.add_gate(name, op, operands);
        self.gate_count += 1;
        gate
    }

    /// Appends a gate under a synthesized `g<counter>` identifier.
    ///
    /// The counter is owned by this instance and retries past identifiers
    /// the caller already claimed. Always counts as a new gate.
    pub fn add_anon_gate(
        &mut self,
        op: GateOp,
        operands: impl IntoIterator<Item = NodeRef>,
    ) -> NodeRef {
        let name = self.symbols.fresh_name();
        self.add_new_gate(name, op, operands)
    }

    /// Designates the output of the circuit.
    ///
    /// # Panics
    ///
    /// Panics if an output is already set or if the reference points outside
    /// this circuit.
    pub fn set_output(&mut self, output: NodeRef) {
        assert!(self.output.is_none(), "Output gate is already set");
        assert!(
            output.id().index() < self.nodes,
            "Output references undefined node index {}",
            output.id().index()
        );
        self.output = Some(output);
    }

    /// Lowers the circuit to an equisatisfiable prenex-CNF formula.
    ///
    /// Inputs keep their prefix order and take the variable IDs
    /// `1..=inputs`; each gate gets the next ID in gate order and is bound in
    /// one trailing existential block (sound because gate values are
    /// functionally determined by the inputs). Each gate contributes the two
    /// directions of its defining equivalence as clauses, honoring operand
    /// polarity; the output reference becomes a unit clause. The result is
    /// named `<name>_CNF`.
    ///
    /// # Errors
    ///
    /// [`CircuitError::MissingOutput`] if no output was set;
    /// [`CircuitError::UnsupportedArity`] if a gate has fewer than 2 or more
    /// than 3 operands.
    pub fn to_qbf(&self) -> Result<Qbf, CircuitError> {
        let output = self.output.ok_or_else(|| CircuitError::MissingOutput {
            name: self.name.clone(),
        })?;
        for gate in &self.gates {
            let arity = gate.operands.len();
            if !(2..=3).contains(&arity) {
                return Err(CircuitError::UnsupportedArity {
                    gate: self.node_name(gate.id).to_string(),
                    arity,
                });
            }
        }

        let mut var_of: Vec<u32> = vec![0; self.nodes];
        let mut next = 0u32;
        for block in &self.prefix {
            for &input in &block.inputs {
                next += 1;
                var_of[input.index()] = next;
            }
        }
        let input_vars = next;
        for gate in &self.gates {
            next += 1;
            var_of[gate.id.index()] = next;
        }

        let lit = |reference: NodeRef| -> Lit {
            let var = Var::new(var_of[reference.id().index()]);
            if reference.is_negated() {
                var.neg()
            } else {
                var.pos()
            }
        };

        let mut qbf = Qbf::new(next, 0, format!("{}_CNF", self.name));
        for block in &self.prefix {
            qbf.add_quantifier_block(
                block.quantifier,
                block.inputs.iter().map(|id| Var::new(var_of[id.index()])),
            );
        }
        if !self.gates.is_empty() {
            qbf.add_quantifier_block(
                Quantifier::Exists,
                (input_vars + 1..=next).map(Var::new),
            );
        }

        for gate in &self.gates {
            let tag = Var::new(var_of[gate.id.index()]);
            match gate.op {
                GateOp::And => {
                    let mut all = Vec::with_capacity(gate.operands.len() + 1);
                    all.extend(gate.operands.iter().map(|&operand| -lit(operand)));
                    all.push(tag.pos());
                    qbf.add_new_clause(all);
                    for &operand in &gate.operands {
                        qbf.add_new_clause([lit(operand), tag.neg()]);
                    }
                }
                GateOp::Or => {
                    let mut all = Vec::with_capacity(gate.operands.len() + 1);
                    all.extend(gate.operands.iter().map(|&operand| lit(operand)));
                    all.push(tag.neg());
                    qbf.add_new_clause(all);
                    for &operand in &gate.operands {
                        qbf.add_new_clause([-lit(operand), tag.pos()]);
                    }
                }
            }
        }
        qbf.add_new_clause([lit(output)]);

        log::debug!(
            "Lowered QBC '{}' to {} variables and {} clauses",
            self.name,
            qbf.variable_count(),
            qbf.clause_count()
        );
        Ok(qbf)
    }
}

/// Human-readable rendering for interactive inspection. Not a wire format;
/// solvers consume the QCIR serialization instead.
impl fmt::Display for Qbc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signed = |reference: &NodeRef| -> String {
            let name = self.node_name(reference.id());
            if reference.is_negated() {
                format!("¬{}", name)
            } else {
                name.to_string()
            }
        };
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Variables: {}", self.variable_count)?;
        writeln!(f, "Gates: {}", self.gate_count)?;
        for block in &self.prefix {
            write!(f, "{}", block.quantifier)?;
            for (i, input) in block.inputs.iter().enumerate() {
                let sep = if i == 0 { "" } else { "," };
                write!(f, "{} {}", sep, self.node_name(*input))?;
            }
            writeln!(f)?;
        }
        if let Some(output) = self.output {
            writeln!(f, "output({})", signed(&output))?;
        }
        for gate in &self.gates {
            write!(f, "{} = ", self.node_name(gate.id))?;
            for (i, operand) in gate.operands.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", gate.op.symbol())?;
                }
                write!(f, "{}", signed(operand))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gadget() -> Qbc {
        let mut circuit = Qbc::new(2, 1, "gadget");
        let x = circuit.add_quantifier_block(Quantifier::Exists, ["x"])[0];
        let y = circuit.add_quantifier_block(Quantifier::Forall, ["y"])[0];
        let g = circuit.add_gate("g", GateOp::And, [x.into(), -y]);
        circuit.set_output(g);
        circuit
    }

    fn dimacs(clause: &[Lit]) -> Vec<i32> {
        clause.iter().map(|lit| lit.to_dimacs()).collect()
    }

    #[test]
    fn test_construction() {
        let circuit = gadget();
        assert_eq!(circuit.variable_count(), 2);
        assert_eq!(circuit.gate_count(), 1);
        assert_eq!(circuit.node_count(), 3);
        assert_eq!(circuit.gates().len(), 1);

        let g = circuit.node("g").unwrap();
        assert_eq!(circuit.node_name(g), "g");
        assert_eq!(circuit.output(), Some(NodeRef::positive(g)));
        assert_eq!(circuit.prefix().len(), 2);
        assert_eq!(circuit.prefix()[1].quantifier, Quantifier::Forall);
    }

    #[test]
    fn test_gate_count_bookkeeping() {
        let mut circuit = Qbc::new(1, 2, "counts");
        let x = circuit.add_quantifier_block(Quantifier::Exists, ["x"])[0];
        circuit.add_gate("declared", GateOp::Or, [x.into(), -x]);
        assert_eq!(circuit.gate_count(), 2);
        circuit.add_new_gate("extra", GateOp::Or, [x.into(), -x]);
        assert_eq!(circuit.gate_count(), 3);
    }

    #[test]
    fn test_anon_gates_skip_taken_names() {
        let mut circuit = Qbc::new(1, 0, "anon");
        let x = circuit.add_quantifier_block(Quantifier::Exists, ["x"])[0];
        circuit.add_new_gate("g1", GateOp::Or, [x.into(), -x]);
        let anon = circuit.add_anon_gate(GateOp::And, [x.into(), -x]);
        assert_eq!(circuit.node_name(anon.id()), "g2");
        let next = circuit.add_anon_gate(GateOp::And, [x.into(), -x]);
        assert_eq!(circuit.node_name(next.id()), "g3");
        assert_eq!(circuit.gate_count(), 3);
    }

    #[test]
    #[should_panic(expected = "already in use")]
    fn test_duplicate_identifier_panics() {
        let mut circuit = Qbc::new(1, 0, "dup");
        let x = circuit.add_quantifier_block(Quantifier::Exists, ["x"])[0];
        circuit.add_gate("x", GateOp::Or, [x.into(), -x]);
    }

    #[test]
    #[should_panic(expected = "already set")]
    fn test_double_output_panics() {
        let mut circuit = gadget();
        let g = circuit.node("g").unwrap();
        circuit.set_output(-g);
    }

    #[test]
    fn test_lowering_clauses() {
        let qbf = gadget().to_qbf().unwrap();
        assert_eq!(qbf.name(), "gadget_CNF");
        assert_eq!(qbf.variable_count(), 3);
        assert_eq!(qbf.clause_count(), 4);
        assert_eq!(qbf.clause_count(), qbf.clauses().len() as u64);

        // x -> 1, y -> 2, g -> 3; g = and(x, -y).
        let clauses: Vec<Vec<i32>> = qbf.clauses().iter().map(|c| dimacs(c)).collect();
        assert_eq!(clauses[0], vec![-1, 2, 3]);
        assert_eq!(clauses[1], vec![1, -3]);
        assert_eq!(clauses[2], vec![-2, -3]);
        assert_eq!(clauses[3], vec![3]);

        let prefix = qbf.prefix();
        assert_eq!(prefix.len(), 3);
        assert_eq!(prefix[2].quantifier, Quantifier::Exists);
        assert_eq!(prefix[2].variables, vec![Var::new(3)]);
    }

    #[test]
    fn test_lowering_or_gate() {
        let mut circuit = Qbc::new(3, 1, "triple");
        let inputs =
            circuit.add_quantifier_block(Quantifier::Exists, ["a", "b", "c"]);
        let g = circuit.add_gate(
            "g",
            GateOp::Or,
            [inputs[0].into(), -inputs[1], inputs[2].into()],
        );
        circuit.set_output(-g);

        let qbf = circuit.to_qbf().unwrap();
        let clauses: Vec<Vec<i32>> = qbf.clauses().iter().map(|c| dimacs(c)).collect();
        assert_eq!(clauses[0], vec![1, -2, 3, -4]);
        assert_eq!(clauses[1], vec![-1, 4]);
        assert_eq!(clauses[2], vec![2, 4]);
        assert_eq!(clauses[3], vec![-3, 4]);
        assert_eq!(clauses[4], vec![-4]);
    }

    #[test]
    fn test_lowering_rejects_bad_arity() {
        let mut circuit = Qbc::new(4, 1, "wide");
        let inputs =
            circuit.add_quantifier_block(Quantifier::Exists, ["a", "b", "c", "d"]);
        let wide = circuit.add_gate(
            "wide",
            GateOp::Or,
            inputs.iter().map(|&id| NodeRef::positive(id)),
        );
        circuit.set_output(wide);

        match circuit.to_qbf() {
            Err(CircuitError::UnsupportedArity { gate, arity }) => {
                assert_eq!(gate, "wide");
                assert_eq!(arity, 4);
            }
            other => panic!("expected arity error, got {:?}", other),
        }
    }

    #[test]
    fn test_lowering_requires_output() {
        let mut circuit = Qbc::new(1, 0, "open");
        circuit.add_quantifier_block(Quantifier::Exists, ["x"]);
        match circuit.to_qbf() {
            Err(CircuitError::MissingOutput { name }) => assert_eq!(name, "open"),
            other => panic!("expected missing output, got {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        let expected = "\
gadget
Variables: 2
Gates: 1
∃ x
∀ y
output(g)
g = x ∧ ¬y
";
        assert_eq!(gadget().to_string(), expected);
    }
}
