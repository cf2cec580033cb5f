//! QCIR-G14 serialization.
//!
//! QCIR is the circuit-level input format of QBF solvers. The output is
//! line-oriented ASCII:
//!
//! ```text
//! #QCIR-G14
//! # Circuit name: <name>
//! # Num. vars.: <n>
//! # Num. gates: <m>
//! exists(x1)
//! forall(y1)
//! output(-s_1_1)
//! s_1_0 = and(-x1, -y1)
//! ```
//!
//! The `#QCIR-G14` header is followed by comment lines with instance
//! metadata, one `exists(...)`/`forall(...)` line per quantifier block, the
//! `output(...)` line, and one definition line per gate in topological
//! order. Negation is spelled with a `-` prefix on the identifier.
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
//! let text = circuit.to_qcir().unwrap();
//! assert!(text.starts_with("#QCIR-G14\n"));
//! assert!(text.contains("g = and(x, -y)"));
//! ```

use std::fmt::Write as _;

use crate::circuit::Qbc;
use crate::reference::NodeRef;

impl Qbc {
    /// Renders the circuit in QCIR-G14.
    ///
    /// # Panics
    ///
    /// Panics if the output gate has not been set; a circuit without an
    /// output is still under construction.
    pub fn to_qcir(&self) -> Result<String, std::fmt::Error> {
        let output = self.output().expect("Output gate is not set");
        let signed = |reference: NodeRef| -> String {
            let name = self.node_name(reference.id());
            if reference.is_negated() {
                format!("-{}", name)
            } else {
                name.to_string()
            }
        };

        let mut out = String::new();
        writeln!(out, "#QCIR-G14")?;
        writeln!(out, "# Circuit name: {}", self.name())?;
        writeln!(out, "# Num. vars.: {}", self.variable_count())?;
        writeln!(out, "# Num. gates: {}", self.gate_count())?;
        for block in self.prefix() {
            write!(out, "{}(", block.quantifier.qcir_keyword())?;
            for (i, input) in block.inputs.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                write!(out, "{}", self.node_name(*input))?;
            }
            writeln!(out, ")")?;
        }
        writeln!(out, "output({})", signed(output))?;
        for gate in self.gates() {
            write!(out, "{} = {}(", self.node_name(gate.id), gate.op)?;
            for (i, operand) in gate.operands.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                write!(out, "{}", signed(*operand))?;
            }
            writeln!(out, ")")?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::circuit::{GateOp, Qbc};
    use crate::types::Quantifier;

    #[test]
    fn test_exact_output() {
        let mut circuit = Qbc::new(2, 2, "pair");
        let x = circuit.add_quantifier_block(Quantifier::Exists, ["x1"])[0];
        let y = circuit.add_quantifier_block(Quantifier::Forall, ["y1"])[0];
        let both = circuit.add_gate("both", GateOp::And, [x.into(), y.into()]);
        let either = circuit.add_gate("either", GateOp::Or, [x.into(), -y, -both]);
        circuit.set_output(-either);

        let expected = "\
#QCIR-G14
# Circuit name: pair
# Num. vars.: 2
# Num. gates: 2
exists(x1)
forall(y1)
output(-either)
both = and(x1, y1)
either = or(x1, -y1, -both)
";
        assert_eq!(circuit.to_qcir().unwrap(), expected);
    }

    #[test]
    #[should_panic(expected = "Output gate is not set")]
    fn test_missing_output_panics() {
        let mut circuit = Qbc::new(1, 0, "open");
        circuit.add_quantifier_block(Quantifier::Exists, ["x"]);
        let _ = circuit.to_qcir();
    }
}
