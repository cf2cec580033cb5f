//! Generator for the Type-1 benchmark family.
//!
//! A Type-1 instance of size `n` plays an `n`-round game over two-bit
//! registers. Round `i` binds a primed register, a universal toggle and an
//! unprimed register, laid out as described in [`crate::encode`]. The matrix
//! consists of three clause groups:
//!
//! - `B` clauses zero the base register and force a bit of the final round's
//!   unprimed register,
//! - `H` clauses tie round `i`'s primed register to the unprimed register of
//!   round `i - 1` (the base register when `i = 1`),
//! - `T` clauses copy the unprimed register from the primed one, with the
//!   half that applies selected by the toggle.
//!
//! Size `n` yields `9n + 4` variables and `12n + 6` clauses.
//!
//! # Examples
//!
//! ```
//! let qbf = qbfgen::type1::generate(3);
//! assert_eq!(qbf.name(), "type1_size3");
//! assert_eq!(qbf.variable_count(), 31);
//! assert_eq!(qbf.clause_count(), 42);
//! ```

use crate::encode::{Bits, Slot};
use crate::formula::Qbf;
use crate::types::{Quantifier, Var};

/// Generates the Type-1 instance of size `n`.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn generate(n: u32) -> Qbf {
    assert!(n >= 1, "Type-1 instances start at size 1");

    let variable_count = 9 * n + 4;
    let clause_count = u64::from(12 * n + 6);
    let mut qbf = Qbf::new(variable_count, clause_count, format!("type1_size{}", n));

    add_prefix(&mut qbf, n);
    add_b_clauses(&mut qbf, n);
    add_h_clauses(&mut qbf, n);
    add_t_clauses(&mut qbf, n);

    assert_eq!(qbf.clauses().len() as u64, clause_count);
    log::debug!(
        "Generated {} with {} variables and {} clauses",
        qbf.name(),
        variable_count,
        clause_count
    );
    qbf
}

fn all_bits() -> impl Iterator<Item = Bits> {
    (0..4).map(Bits::new)
}

/// The unprimed register fed into round `step`, which for the first round is
/// the base register.
fn prior_register(step: u32, bits: Bits) -> Var {
    if step == 1 {
        Slot::base(bits).encode()
    } else {
        Slot::unprimed(step - 1, bits).encode()
    }
}

fn add_prefix(qbf: &mut Qbf, n: u32) {
    qbf.add_quantifier_block(Quantifier::Exists, all_bits().map(|b| Slot::base(b).encode()));
    for i in 1..=n {
        qbf.add_quantifier_block(
            Quantifier::Exists,
            all_bits().map(move |b| Slot::primed(i, b).encode()),
        );
        qbf.add_quantifier_block(Quantifier::Forall, [Slot::toggle(i).encode()]);
        qbf.add_quantifier_block(
            Quantifier::Exists,
            all_bits().map(move |b| Slot::unprimed(i, b).encode()),
        );
    }
}

fn add_b_clauses(qbf: &mut Qbf, n: u32) {
    for bits in all_bits() {
        qbf.add_clause([Slot::base(bits).encode().neg()]);
    }
    for high in [false, true] {
        qbf.add_clause([
            Slot::unprimed(n, Bits::from_bits(high, false)).encode().pos(),
            Slot::unprimed(n, Bits::from_bits(high, true)).encode().pos(),
        ]);
    }
}

fn add_h_clauses(qbf: &mut Qbf, n: u32) {
    for i in 1..=n {
        for j in [false, true] {
            for k in [false, true] {
                for l in [false, true] {
                    qbf.add_clause([
                        Slot::primed(i, Bits::from_bits(false, k)).encode().neg(),
                        Slot::primed(i, Bits::from_bits(true, l)).encode().neg(),
                        prior_register(i, Bits::from_bits(j, false)).pos(),
                        prior_register(i, Bits::from_bits(j, true)).pos(),
                    ]);
                }
            }
        }
    }
}

fn add_t_clauses(qbf: &mut Qbf, n: u32) {
    for i in 1..=n {
        let toggle = Slot::toggle(i).encode();
        for low in [false, true] {
            qbf.add_clause([
                Slot::unprimed(i, Bits::from_bits(false, low)).encode().neg(),
                toggle.pos(),
                Slot::primed(i, Bits::from_bits(false, low)).encode().pos(),
            ]);
        }
        for low in [false, true] {
            qbf.add_clause([
                Slot::unprimed(i, Bits::from_bits(true, low)).encode().neg(),
                toggle.neg(),
                Slot::primed(i, Bits::from_bits(true, low)).encode().pos(),
            ]);
        }
    }
}
