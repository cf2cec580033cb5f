//! QDIMACS serialization and parsing.
//!
//! QDIMACS is the prenex-CNF input format understood by QBF solvers. The
//! output here is line-oriented ASCII:
//!
//! ```text
//! c <name>
//! c num. vars.: <n>
//! c num. clauses.: <m>
//! p cnf <n> <m>
//! e 1 2 3 4 0
//! a 5 0
//! -1 2 0
//! ```
//!
//! Comment lines carry instance metadata, the problem line declares the
//! variable and clause counts, then one line per quantifier block (`e`/`a`,
//! ids, trailing `0`) and one line per clause (signed literals, trailing
//! `0`). Block lines always precede clause lines.
//!
//! [`parse`] reads the same format back, recovering the declared counts, the
//! prefix, and the clauses; it is the other half of the round-trip tests.
//!
//! # Examples
//!
//! ```
//! use qbfgen::formula::Qbf;
//! use qbfgen::types::{Lit, Quantifier, Var};
//!
//! let mut qbf = Qbf::new(2, 1, "pair");
//! qbf.add_quantifier_block(Quantifier::Exists, [Var::new(1), Var::new(2)]);
//! qbf.add_clause([Lit::from_dimacs(1), Lit::from_dimacs(-2)]);
//!
//! let text = qbf.to_qdimacs().unwrap();
//! assert!(text.contains("p cnf 2 1"));
//! let back = qbfgen::qdimacs::parse(&text).unwrap();
//! assert_eq!(back.variable_count(), 2);
//! assert_eq!(back.clause_count(), 1);
//! ```

use std::fmt::Write as _;
use std::num::ParseIntError;

use thiserror::Error;

use crate::formula::Qbf;
use crate::types::{Lit, Quantifier, Var};

impl Qbf {
    /// Renders the formula in QDIMACS.
    ///
    /// The output is deterministic and depends only on the model's content;
    /// the model itself is never mutated.
    pub fn to_qdimacs(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "c {}", self.name())?;
        writeln!(out, "c num. vars.: {}", self.variable_count())?;
        writeln!(out, "c num. clauses.: {}", self.clause_count())?;
        writeln!(out, "p cnf {} {}", self.variable_count(), self.clause_count())?;
        for block in self.prefix() {
            write!(out, "{}", block.quantifier.qdimacs_token())?;
            for var in &block.variables {
                write!(out, " {}", var.id())?;
            }
            writeln!(out, " 0")?;
        }
        for clause in self.clauses() {
            for lit in clause {
                write!(out, "{} ", lit)?;
            }
            writeln!(out, "0")?;
        }
        Ok(out)
    }
}

/// Failures while reading a QDIMACS document.
///
/// Every variant names the 1-based line it refers to.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing problem line")]
    MissingProblemLine,
    #[error("line {line}: expected `p cnf <vars> <clauses>`")]
    MalformedProblemLine { line: usize },
    #[error("line {line}: malformed integer")]
    BadInteger {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: variable IDs must be positive")]
    BadVariable { line: usize },
    #[error("line {line}: missing trailing 0")]
    MissingTerminator { line: usize },
    #[error("line {line}: tokens after the terminating 0")]
    TrailingTokens { line: usize },
    #[error("line {line}: empty clause")]
    EmptyClause { line: usize },
    #[error("line {line}: quantifier block after the first clause")]
    BlockAfterClause { line: usize },
}

/// Parses a QDIMACS document back into a [`Qbf`].
///
/// The first comment line before the problem line, when present, is taken as
/// the instance name (matching what [`Qbf::to_qdimacs`] writes). Declared
/// counts come from the problem line verbatim; they are not validated
/// against the parsed content.
pub fn parse(text: &str) -> Result<Qbf, ParseError> {
    let mut name: Option<String> = None;
    let mut qbf: Option<Qbf> = None;
    let mut seen_clause = false;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('c') {
            if name.is_none() && qbf.is_none() {
                name = Some(comment.trim().to_string());
            }
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        match qbf {
            None => {
                if tokens.len() != 4 || tokens[0] != "p" || tokens[1] != "cnf" {
                    return Err(ParseError::MalformedProblemLine { line });
                }
                let variables: u32 = parse_int(tokens[2], line)?;
                let clauses: u64 = parse_int(tokens[3], line)?;
                qbf = Some(Qbf::new(variables, clauses, name.take().unwrap_or_default()));
            }
            Some(ref mut qbf) => {
                if tokens[0] == "e" || tokens[0] == "a" {
                    if seen_clause {
                        return Err(ParseError::BlockAfterClause { line });
                    }
                    let quantifier = if tokens[0] == "e" {
                        Quantifier::Exists
                    } else {
                        Quantifier::Forall
                    };
                    let ids = parse_terminated(&tokens[1..], line)?;
                    let mut variables = Vec::with_capacity(ids.len());
                    for id in ids {
                        if id <= 0 {
                            return Err(ParseError::BadVariable { line });
                        }
                        variables.push(Var::new(id as u32));
                    }
                    qbf.add_quantifier_block(quantifier, variables);
                } else {
                    let body = parse_terminated(&tokens, line)?;
                    if body.is_empty() {
                        return Err(ParseError::EmptyClause { line });
                    }
                    seen_clause = true;
                    qbf.add_clause(body.into_iter().map(Lit::from_dimacs));
                }
            }
        }
    }

    qbf.ok_or(ParseError::MissingProblemLine)
}

/// Parses a `0`-terminated run of integers; the terminator is consumed and
/// must be the last token on the line.
fn parse_terminated(tokens: &[&str], line: usize) -> Result<Vec<i32>, ParseError> {
    let mut values = Vec::with_capacity(tokens.len());
    for token in tokens {
        values.push(parse_int::<i32>(token, line)?);
    }
    match values.pop() {
        Some(0) => {}
        _ => return Err(ParseError::MissingTerminator { line }),
    }
    if values.contains(&0) {
        return Err(ParseError::TrailingTokens { line });
    }
    Ok(values)
}

fn parse_int<T: std::str::FromStr<Err = ParseIntError>>(
    token: &str,
    line: usize,
) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|source| ParseError::BadInteger { line, source })
}
