//! Operations that can appear on the right-hand side of a `Def`/`Print`.

use std::fmt;

use super::value::Value;

/// An operation: either a bare value, or the sum of two values.
///
/// For [`OperationKind::Simple`], `rhs` is unused (always the left-hand
/// value, or an immediate `0` — callers should not read it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub kind: OperationKind,
    pub lhs: Value,
    pub rhs: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Simple,
    Add,
}

impl Operation {
    pub fn simple(lhs: Value) -> Self {
        Operation {
            kind: OperationKind::Simple,
            lhs,
            rhs: Value::immediate(0),
        }
    }

    pub fn add(lhs: Value, rhs: Value) -> Self {
        Operation {
            kind: OperationKind::Add,
            lhs,
            rhs,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self.kind, OperationKind::Add)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OperationKind::Simple => write!(f, "{}", self.lhs),
            OperationKind::Add => write!(f, "{} + {}", self.lhs, self.rhs),
        }
    }
}
