//! Variable layout for the Type-1 family.
//!
//! Type-1 formulas name their variables through structured descriptors
//! ([`Slot`]) instead of raw integers. For a formula of size `n` the encoder
//! maps the `9n+4` valid descriptors onto `[1, 9n+4]`:
//!
//! - the four base slots (step 0) take `1..=4`;
//! - for each step `i >= 1`, the unprimed block takes `9i-4..=9i-1`, the
//!   primed block `9i..=9i+3`, and the toggle variable `9i+4`.
//!
//! The mapping is a bijection, so [`Slot::decode`] recovers the descriptor
//! from any variable ID.

use crate::types::Var;

/// A two-bit suffix naming one of the four slots inside a block.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Bits(u8);

impl Bits {
    /// Creates a suffix from its base-2 value.
    ///
    /// # Panics
    ///
    /// Panics if `value > 3`; suffixes are exactly two bits wide.
    pub fn new(value: u8) -> Self {
        assert!(value < 4, "Bit suffixes are two bits wide, got {}", value);
        Bits(value)
    }

    pub fn from_bits(high: bool, low: bool) -> Self {
        Bits(((high as u8) << 1) | low as u8)
    }

    /// Returns the base-2 value of the suffix, in `0..=3`.
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn high(self) -> bool {
        self.0 & 0b10 != 0
    }

    pub fn low(self) -> bool {
        self.0 & 0b01 != 0
    }
}

impl std::fmt::Display for Bits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02b}", self.0)
    }
}

/// A structured variable descriptor of the Type-1 family.
///
/// Every variable of a Type-1 formula is one of four kinds: a base slot of
/// the initial step, an unprimed or primed slot of some step `i >= 1`, or the
/// per-step toggle variable driven by the universal player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Slot {
    Base(Bits),
    Unprimed { step: u32, bits: Bits },
    Primed { step: u32, bits: Bits },
    Toggle { step: u32 },
}

impl Slot {
    pub fn base(bits: Bits) -> Self {
        Slot::Base(bits)
    }

    /// # Panics
    ///
    /// Panics if `step == 0`; step 0 only has base slots.
    pub fn unprimed(step: u32, bits: Bits) -> Self {
        assert!(step >= 1, "Unprimed slots start at step 1");
        Slot::Unprimed { step, bits }
    }

    /// # Panics
    ///
    /// Panics if `step == 0`.
    pub fn primed(step: u32, bits: Bits) -> Self {
        assert!(step >= 1, "Primed slots start at step 1");
        Slot::Primed { step, bits }
    }

    /// # Panics
    ///
    /// Panics if `step == 0`.
    pub fn toggle(step: u32) -> Self {
        assert!(step >= 1, "Toggle variables start at step 1");
        Slot::Toggle { step }
    }

    /// Maps the descriptor to its variable ID.
    pub fn encode(self) -> Var {
        let id = match self {
            Slot::Base(bits) => bits.value() as u32 + 1,
            Slot::Unprimed { step, bits } => 9 * (step - 1) + bits.value() as u32 + 5,
            Slot::Primed { step, bits } => 9 * (step - 1) + bits.value() as u32 + 9,
            Slot::Toggle { step } => 9 * step + 4,
        };
        Var::new(id)
    }

    /// Recovers the descriptor behind a variable ID.
    ///
    /// Total for every valid [`Var`]; inverse of [`Slot::encode`].
    pub fn decode(var: Var) -> Self {
        let id = var.id();
        if id <= 4 {
            return Slot::Base(Bits::new((id - 1) as u8));
        }
        let step = (id - 5) / 9 + 1;
        match (id - 5) % 9 {
            r @ 0..=3 => Slot::Unprimed {
                step,
                bits: Bits::new(r as u8),
            },
            r @ 4..=7 => Slot::Primed {
                step,
                bits: Bits::new((r - 4) as u8),
            },
            _ => Slot::Toggle { step },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All descriptors a size-`n` formula encodes, in no particular order.
    fn slots_for(n: u32) -> Vec<Slot> {
        let mut slots = Vec::new();
        for value in 0..4 {
            slots.push(Slot::base(Bits::new(value)));
        }
        for step in 1..=n {
            for value in 0..4 {
                slots.push(Slot::unprimed(step, Bits::new(value)));
                slots.push(Slot::primed(step, Bits::new(value)));
            }
            slots.push(Slot::toggle(step));
        }
        slots
    }

    #[test]
    fn test_known_positions() {
        assert_eq!(Slot::base(Bits::new(0)).encode().id(), 1);
        assert_eq!(Slot::base(Bits::new(3)).encode().id(), 4);
        assert_eq!(Slot::unprimed(1, Bits::new(0)).encode().id(), 5);
        assert_eq!(Slot::unprimed(1, Bits::new(3)).encode().id(), 8);
        assert_eq!(Slot::primed(1, Bits::new(0)).encode().id(), 9);
        assert_eq!(Slot::primed(1, Bits::new(3)).encode().id(), 12);
        assert_eq!(Slot::toggle(1).encode().id(), 13);
        assert_eq!(Slot::toggle(2).encode().id(), 22);
        assert_eq!(Slot::unprimed(2, Bits::new(0)).encode().id(), 14);
    }

    #[test]
    fn test_encode_covers_range() {
        for n in 1..=6 {
            let mut ids: Vec<u32> = slots_for(n).into_iter().map(|s| s.encode().id()).collect();
            ids.sort_unstable();
            let expected: Vec<u32> = (1..=9 * n + 4).collect();
            assert_eq!(ids, expected, "layout for n={}", n);
        }
    }

    #[test]
    fn test_decode_is_inverse() {
        for slot in slots_for(5) {
            assert_eq!(Slot::decode(slot.encode()), slot);
        }
        for id in 1..=9 * 5 + 4 {
            let var = Var::new(id);
            assert_eq!(Slot::decode(var).encode(), var);
        }
    }

    #[test]
    fn test_bits_accessors() {
        let bits = Bits::from_bits(true, false);
        assert_eq!(bits.value(), 2);
        assert!(bits.high());
        assert!(!bits.low());
        assert_eq!(bits.to_string(), "10");
    }

    #[test]
    #[should_panic(expected = "two bits wide")]
    fn test_wide_suffix_panics() {
        Bits::new(4);
    }

    #[test]
    #[should_panic(expected = "start at step 1")]
    fn test_step_zero_panics() {
        Slot::unprimed(0, Bits::new(0));
    }
}
