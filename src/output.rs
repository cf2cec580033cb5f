//! Output sinks for generated instances.
//!
//! Instances either go to standard output, guarded by a size cutoff so a
//! stray large instance does not flood the terminal, or to a file named
//! after the instance (`{name}.out`, `{name}.qdimacs`, `{name}.qcir`).
//!
//! # Examples
//!
//! ```
//! use qbfgen::formula::Qbf;
//!
//! let huge = Qbf::new(512, 0, "too_big");
//! assert!(!huge.print());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::circuit::Qbc;
use crate::formula::Qbf;

const FORMULA_PRINT_LIMIT: u64 = 100;
const CIRCUIT_PRINT_LIMIT: u64 = 500;

/// An error produced while writing an instance to a sink.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("could not render the instance")]
    Render(#[from] std::fmt::Error),
    #[error("could not write the instance")]
    Io(#[from] io::Error),
}

impl Qbf {
    /// Prints the human-readable rendition to standard output, unless the
    /// formula is too large for a terminal. Returns whether it was printed.
    pub fn print(&self) -> bool {
        if !self.fits_console() {
            return false;
        }
        print!("{}", self);
        true
    }

    /// Prints the QDIMACS rendition to standard output under the same size
    /// guard as [`Qbf::print`]. Returns whether it was printed.
    pub fn print_qdimacs(&self) -> Result<bool, WriteError> {
        if !self.fits_console() {
            return Ok(false);
        }
        print!("{}", self.to_qdimacs()?);
        Ok(true)
    }

    fn fits_console(&self) -> bool {
        if u64::from(self.variable_count()) > FORMULA_PRINT_LIMIT {
            log::warn!(
                "Not printing {}: more than {} variables",
                self.name(),
                FORMULA_PRINT_LIMIT
            );
            return false;
        }
        if self.clause_count() > FORMULA_PRINT_LIMIT {
            log::warn!(
                "Not printing {}: more than {} clauses",
                self.name(),
                FORMULA_PRINT_LIMIT
            );
            return false;
        }
        true
    }

    /// Writes the QDIMACS rendition to `path`.
    pub fn save_qdimacs(&self, path: impl AsRef<Path>) -> Result<(), WriteError> {
        let text = self.to_qdimacs()?;
        fs::write(path.as_ref(), text)?;
        log::debug!("Wrote {} to {}", self.name(), path.as_ref().display());
        Ok(())
    }

    /// Writes the QDIMACS rendition to `{name}.qdimacs` inside `dir` and
    /// returns the path written.
    pub fn save_qdimacs_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf, WriteError> {
        let path = dir.as_ref().join(format!("{}.qdimacs", self.name()));
        self.save_qdimacs(&path)?;
        Ok(path)
    }

    /// Writes the human-readable rendition to `{name}.out` inside `dir` and
    /// returns the path written.
    pub fn save_printout_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf, WriteError> {
        let path = dir.as_ref().join(format!("{}.out", self.name()));
        fs::write(&path, self.to_string())?;
        log::debug!("Wrote {} to {}", self.name(), path.display());
        Ok(path)
    }
}

impl Qbc {
    /// Prints the QCIR rendition to standard output, unless the circuit is
    /// too large for a terminal. Returns whether it was printed.
    ///
    /// # Panics
    ///
    /// Panics if the circuit is small enough to print but its output gate
    /// has not been set.
    pub fn print_qcir(&self) -> Result<bool, WriteError> {
        if u64::from(self.variable_count()) > CIRCUIT_PRINT_LIMIT {
            log::warn!(
                "Not printing {}: more than {} variables",
                self.name(),
                CIRCUIT_PRINT_LIMIT
            );
            return Ok(false);
        }
        if self.gate_count() > CIRCUIT_PRINT_LIMIT {
            log::warn!(
                "Not printing {}: more than {} gates",
                self.name(),
                CIRCUIT_PRINT_LIMIT
            );
            return Ok(false);
        }
        print!("{}", self.to_qcir()?);
        Ok(true)
    }

    /// Writes the QCIR rendition to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the output gate has not been set.
    pub fn save_qcir(&self, path: impl AsRef<Path>) -> Result<(), WriteError> {
        let text = self.to_qcir()?;
        fs::write(path.as_ref(), text)?;
        log::debug!("Wrote {} to {}", self.name(), path.as_ref().display());
        Ok(())
    }

    /// Writes the QCIR rendition to `{name}.qcir` inside `dir` and returns
    /// the path written.
    ///
    /// # Panics
    ///
    /// Panics if the output gate has not been set.
    pub fn save_qcir_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf, WriteError> {
        let path = dir.as_ref().join(format!("{}.qcir", self.name()));
        self.save_qcir(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::GateOp;
    use crate::types::{Lit, Quantifier, Var};

    use test_log::test;

    fn sample_formula(name: &str) -> Qbf {
        let mut qbf = Qbf::new(2, 2, name);
        qbf.add_quantifier_block(Quantifier::Exists, [Var::new(1)]);
        qbf.add_quantifier_block(Quantifier::Forall, [Var::new(2)]);
        qbf.add_clause([Lit::from_dimacs(1), Lit::from_dimacs(2)]);
        qbf.add_clause([Lit::from_dimacs(-1), Lit::from_dimacs(-2)]);
        qbf
    }

    fn sample_circuit(name: &str) -> Qbc {
        let mut circuit = Qbc::new(2, 1, name);
        let x = circuit.add_quantifier_block(Quantifier::Exists, ["x"])[0];
        let y = circuit.add_quantifier_block(Quantifier::Forall, ["y"])[0];
        let g = circuit.add_gate("g", GateOp::And, [x.into(), -y]);
        circuit.set_output(g);
        circuit
    }

    #[test]
    fn test_console_guard() {
        assert!(sample_formula("small").print());
        assert!(sample_formula("small").print_qdimacs().unwrap());

        assert!(!Qbf::new(101, 0, "many_variables").print());
        let mut many_clauses = Qbf::new(1, 0, "many_clauses");
        for _ in 0..101 {
            many_clauses.add_new_clause([Lit::from_dimacs(1)]);
        }
        assert!(!many_clauses.print());
        assert!(!many_clauses.print_qdimacs().unwrap());

        assert!(sample_circuit("small").print_qcir().unwrap());
        assert!(!Qbc::new(501, 0, "huge").print_qcir().unwrap());
    }

    #[test]
    fn test_save_qdimacs_roundtrip() {
        let qbf = sample_formula("qbfgen_sink_roundtrip");
        let path = qbf.save_qdimacs_in(std::env::temp_dir()).unwrap();
        assert!(path.ends_with("qbfgen_sink_roundtrip.qdimacs"));

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, qbf.to_qdimacs().unwrap());
        let parsed = crate::qdimacs::parse(&text).unwrap();
        assert_eq!(parsed.variable_count(), qbf.variable_count());
        assert_eq!(parsed.clause_count(), qbf.clause_count());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_save_printout() {
        let qbf = sample_formula("qbfgen_sink_printout");
        let path = qbf.save_printout_in(std::env::temp_dir()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, qbf.to_string());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_save_qcir() {
        let circuit = sample_circuit("qbfgen_sink_circuit");
        let path = circuit.save_qcir_in(std::env::temp_dir()).unwrap();
        assert!(path.ends_with("qbfgen_sink_circuit.qcir"));
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, circuit.to_qcir().unwrap());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_save_to_bad_path() {
        let qbf = sample_formula("unwritable");
        let missing = std::env::temp_dir().join("qbfgen_missing_directory");
        assert!(matches!(
            qbf.save_qdimacs_in(&missing),
            Err(WriteError::Io(_))
        ));
    }
}
