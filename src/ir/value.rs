//! A tagged 32-bit value: either an immediate constant or a virtual register.
//!
//! The kind is packed into the most-significant bit of the payload (MSB set
//! means register) rather than represented as a two-word enum, so that
//! printing and equality match the textual IR byte-for-byte.

use std::fmt;

const MSB: u32 = 1 << 31;

/// Either an immediate literal or a virtual-register reference.
///
/// Both payloads are bounded by `2^31 - 1`; the top bit is the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Value(u32);

impl Value {
    /// Construct an immediate value. Panics if `v` does not fit in 31 bits.
    pub fn immediate(v: u32) -> Self {
        assert!(v < MSB, "immediate {v} does not fit in 31 bits");
        Value(v)
    }

    /// Construct a register value. Panics if `r` does not fit in 31 bits.
    pub fn register(r: u32) -> Self {
        assert!(r < MSB, "register {r} does not fit in 31 bits");
        Value(r | MSB)
    }

    /// Is this a register reference?
    pub fn is_register(self) -> bool {
        self.0 & MSB != 0
    }

    /// Is this an immediate literal?
    pub fn is_immediate(self) -> bool {
        !self.is_register()
    }

    /// The numeric payload, with the kind bit stripped.
    pub fn payload(self) -> u32 {
        self.0 & !MSB
    }

    /// The register number, if this is a register.
    pub fn as_register(self) -> Option<u32> {
        self.is_register().then(|| self.payload())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_register() {
            write!(f, "%{}", self.payload())
        } else {
            write!(f, "{}", self.payload())
        }
    }
}
