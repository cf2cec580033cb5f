//! Generators for the Type-2 benchmark family.
//!
//! The gate generator builds a quantified circuit that runs a three-state
//! automaton over the input pairs. Stage `k` turns `(x_k, y_k)` into a
//! one-hot `adder` triple and combines it with the previous stage's one-hot
//! state `s_{k-1}_*`, tracking the running sum of all inputs modulo 3. The
//! output negates the state selected by `n mod 3`, so the circuit accepts
//! exactly the assignments whose number of true inputs is not congruent to
//! `n` modulo 3.
//!
//! The slow generator spells the same relation out as CNF over the bare
//! inputs, one clause per subset of congruent size. Exponential in `n`, but
//! an independent oracle the gate generator can be checked against.
//!
//! # Examples
//!
//! ```
//! let circuit = qbfgen::type2::generate(2);
//! assert_eq!(circuit.name(), "type2_size2");
//! assert_eq!(circuit.variable_count(), 4);
//! assert_eq!(circuit.gate_count(), 22);
//! ```

use num_bigint::{BigUint, ToBigUint};

use crate::circuit::{GateOp, Qbc};
use crate::formula::Qbf;
use crate::reference::NodeRef;
use crate::types::{Quantifier, Var};

/// Generates the Type-2 circuit of size `n`.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn generate(n: u32) -> Qbc {
    assert!(n >= 1, "Type-2 instances start at size 1");

    let mut circuit = Qbc::new(2 * n, 0, format!("type2_size{}", n));

    let mut xs = Vec::with_capacity(n as usize);
    let mut ys = Vec::with_capacity(n as usize);
    for i in 1..=n {
        xs.push(circuit.add_quantifier_block(Quantifier::Exists, [format!("x{}", i)])[0]);
        ys.push(circuit.add_quantifier_block(Quantifier::Forall, [format!("y{}", i)])[0]);
    }

    // Stage 1: one-hot encoding of x_1 + y_1.
    let x = xs[0];
    let y = ys[0];
    let s_1_0 = circuit.add_new_gate("s_1_0", GateOp::And, [-x, -y]);
    let xor_1 = circuit.add_new_gate("xor_1", GateOp::And, [x.into(), -y]);
    let xor_2 = circuit.add_new_gate("xor_2", GateOp::And, [-x, y.into()]);
    let s_1_1 = circuit.add_new_gate("s_1_1", GateOp::Or, [xor_1, xor_2]);
    let s_1_2 = circuit.add_new_gate("s_1_2", GateOp::And, [x.into(), y.into()]);
    let mut state = vec![s_1_0, s_1_1, s_1_2];

    for k in 2..=n {
        let x = xs[(k - 1) as usize];
        let y = ys[(k - 1) as usize];
        let xor_1 = circuit.add_new_gate(format!("xor_1_{}", k), GateOp::And, [x.into(), -y]);
        let xor_2 = circuit.add_new_gate(format!("xor_2_{}", k), GateOp::And, [-x, y.into()]);
        let adder = [
            circuit.add_new_gate(format!("adder_{}_0", k), GateOp::And, [-x, -y]),
            circuit.add_new_gate(format!("adder_{}_1", k), GateOp::Or, [xor_1, xor_2]),
            circuit.add_new_gate(format!("adder_{}_2", k), GateOp::And, [x.into(), y.into()]),
        ];

        // State j advances to state m under adder value (m - j) mod 3.
        let mut next = Vec::with_capacity(3);
        for m in 0..3 {
            let aux: Vec<NodeRef> = (0..3)
                .map(|j| {
                    circuit.add_new_gate(
                        format!("aux_{}_{}_{}", k, m, j),
                        GateOp::And,
                        [state[j], adder[(m + 3 - j) % 3]],
                    )
                })
                .collect();
            next.push(circuit.add_new_gate(format!("s_{}_{}", k, m), GateOp::Or, aux));
        }
        state = next;
    }

    circuit.set_output(-state[(n % 3) as usize]);
    log::debug!(
        "Generated {} with {} inputs and {} gates",
        circuit.name(),
        circuit.variable_count(),
        circuit.gate_count()
    );
    circuit
}

/// Generates the brute-force CNF rendition of the Type-2 instance of size
/// `n`: one clause per subset of the `2n` variables whose size is congruent
/// to `n` modulo 3, negating exactly the subset's variables.
///
/// Costs `Θ(4^n)` time and clauses; intended as a cross-check oracle for
/// [`generate`], not for producing large instances.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn generate_slow(n: u32) -> Qbf {
    assert!(n >= 1, "Type-2 instances start at size 1");

    let width = 2 * n;
    let mut qbf = Qbf::new(width, 0, format!("type2_size{}", n));
    for i in 1..=n {
        qbf.add_quantifier_block(Quantifier::Exists, [Var::new(2 * i - 1)]);
        qbf.add_quantifier_block(Quantifier::Forall, [Var::new(2 * i)]);
    }

    for size in 0..=width {
        if size % 3 != n % 3 {
            continue;
        }
        for_each_subset(width, size, &mut |chosen| {
            qbf.add_new_clause((1..=width).map(|v| {
                let var = Var::new(v);
                if chosen.binary_search(&v).is_ok() {
                    var.neg()
                } else {
                    var.pos()
                }
            }));
        });
    }
    qbf
}

/// Number of clauses [`generate_slow`] produces for size `n`, i.e. the sum
/// of the binomial coefficients `C(2n, i)` over `i ≡ n (mod 3)`.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn slow_clause_count(n: u32) -> BigUint {
    assert!(n >= 1, "Type-2 instances start at size 1");

    let width = 2 * n;
    let mut total = BigUint::ZERO;
    let mut binomial = 1.to_biguint().unwrap();
    for size in 0..=width {
        if size % 3 == n % 3 {
            total += &binomial;
        }
        if size < width {
            binomial = binomial * (width - size) / (size + 1);
        }
    }
    total
}

/// Calls `f` with every size-`size` subset of `1..=width`, in lexicographic
/// order, as a sorted slice.
fn for_each_subset(width: u32, size: u32, f: &mut impl FnMut(&[u32])) {
    fn go<F: FnMut(&[u32])>(start: u32, width: u32, size: u32, chosen: &mut Vec<u32>, f: &mut F) {
        if chosen.len() as u32 == size {
            f(chosen);
            return;
        }
        let needed = size - chosen.len() as u32;
        let mut v = start;
        while v + needed <= width + 1 {
            chosen.push(v);
            go(v + 1, width, size, chosen, f);
            chosen.pop();
            v += 1;
        }
    }
    go(1, width, size, &mut Vec::new(), f)
}
