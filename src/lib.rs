//! # qbfgen: Quantified Boolean Benchmark Generators in Rust
//!
//! **`qbfgen`** builds parametrized quantified Boolean formulas (QBF) and quantified Boolean
//! circuits (QBC) used as synthetic benchmarks for solver evaluation, and serializes them to the
//! standard solver input formats.
//!
//! ## What is an instance?
//!
//! A QBF is a quantifier prefix over propositional variables followed by a matrix in conjunctive
//! normal form; a QBC replaces the matrix with a DAG of named `and`/`or` gates culminating in one
//! designated output. Every instance produced here is fully determined by its size parameter `n`,
//! so benchmarks can be regenerated bit for bit.
//!
//! ## Key Features
//!
//! - **Two benchmark families**: [`type1`] builds a QBF whose rounds play a game over two-bit
//!   registers with a fixed variable layout; [`type2`] builds a QBC running a mod-3 counting
//!   automaton over alternately quantified input pairs, plus a brute-force CNF oracle to check
//!   it against.
//! - **Bit-exact wire formats**: QDIMACS output and parsing for formulas
//!   ([`Qbf::to_qdimacs`][crate::formula::Qbf::to_qdimacs]) and QCIR-G14 output for circuits
//!   ([`Qbc::to_qcir`][crate::circuit::Qbc::to_qcir]).
//! - **CNF lowering**: circuits convert to equisatisfiable formulas via a Tseitin-style
//!   expansion ([`Qbc::to_qbf`][crate::circuit::Qbc::to_qbf]), one tag variable per gate.
//! - **Exhaustive cross-checks**: small instances can be simulated and decided outright
//!   ([`eval`]), which is how the generators and the lowering are validated.
//!
//! ## Quick Start
//!
//! Add `qbfgen` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qbfgen = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use qbfgen::{type1, type2};
//!
//! // Generate the smallest Type-1 instance.
//! let qbf = type1::generate(1);
//! assert_eq!(qbf.variable_count(), 13);
//! assert_eq!(qbf.clause_count(), 18);
//!
//! // Serialize it for a solver.
//! let text = qbf.to_qdimacs().unwrap();
//! assert!(text.starts_with("c type1_size1\n"));
//!
//! // Type-2 instances are circuits first, formulas on demand.
//! let circuit = type2::generate(1);
//! assert!(circuit.to_qcir().unwrap().contains("output(-s_1_1)"));
//! let lowered = circuit.to_qbf().unwrap();
//! assert_eq!(lowered.variable_count(), 7);
//! ```
//!
//! ## Core Components
//!
//! - **[`formula`]** and **[`circuit`]**: the QBF and QBC models, grown monotonically by the
//!   generators and immutable afterwards.
//! - **[`type1`]** and **[`type2`]**: the benchmark families themselves.
//! - **[`qdimacs`]**, **[`qcir`]** and **[`output`]**: wire formats and sinks.
//!
//! The [`encode`] module documents the Type-1 variable layout in detail.

pub mod circuit;
pub mod encode;
pub mod eval;
pub mod formula;
pub mod output;
pub mod qcir;
pub mod qdimacs;
pub mod reference;
pub mod type1;
pub mod type2;
pub mod types;
