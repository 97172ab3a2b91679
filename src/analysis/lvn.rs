//! Local value numbering: within one basic block, give every distinct
//! value an integer number and rewrite a redundant `Add` (one whose two
//! operand numbers have already been seen together) into a copy of the
//! earlier result.
//!
//! Deliberately linear-scan, not hashed: blocks in this IR are small, and
//! a `Vec` scan of a handful of entries fits in a cache line or two, same
//! tradeoff the original makes.

use crate::ir::{BasicBlock, Operation, OperationKind, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LvnAdd {
    lnum: u32,
    rnum: u32,
}

/// Per-block value-numbering state. Reusable across blocks via [`Lvn::clear`].
#[derive(Debug, Default)]
pub struct Lvn {
    number_for_value: Vec<(Value, u32)>,
    number_for_add: Vec<(LvnAdd, u32)>,
    counter: u32,
}

impl Lvn {
    pub fn new() -> Self {
        Lvn::default()
    }

    pub fn clear(&mut self) {
        self.number_for_value.clear();
        self.number_for_add.clear();
        self.counter = 0;
    }

    fn number_for_value_or_create(&mut self, val: Value) -> u32 {
        if let Some(&(_, num)) = self.number_for_value.iter().find(|(v, _)| *v == val) {
            return num;
        }
        self.counter += 1;
        self.number_for_value.push((val, self.counter));
        self.counter
    }

    fn set_number_for_value(&mut self, val: Value, num: u32) {
        if let Some(entry) = self.number_for_value.iter_mut().find(|(v, _)| *v == val) {
            entry.1 = num;
        } else {
            self.number_for_value.push((val, num));
        }
    }

    fn value_for_number(&self, num: u32) -> Value {
        self.number_for_value
            .iter()
            .find(|(_, n)| *n == num)
            .map(|(v, _)| *v)
            .expect("LVN number with no associated value")
    }

    /// Number an `Add` operation. Returns `(number, already_seen)`.
    fn number_for_add(&mut self, op: Operation) -> (u32, bool) {
        debug_assert!(op.is_add());
        let lnum = self.number_for_value_or_create(op.lhs);
        let rnum = self.number_for_value_or_create(op.rhs);
        let key = LvnAdd { lnum, rnum };
        if let Some(&(_, num)) = self.number_for_add.iter().find(|(k, _)| *k == key) {
            return (num, true);
        }
        self.counter += 1;
        self.number_for_add.push((key, self.counter));
        (self.counter, false)
    }

    /// Apply value numbering to every instruction in `bb`, rewriting
    /// redundant `Add`s in place to `Simple` copies of the earlier result.
    pub fn apply(&mut self, bb: &mut BasicBlock) {
        for inst in &mut bb.insts {
            if let crate::ir::Instruction::Def { reg, op } = inst {
                if op.kind == OperationKind::Add {
                    let (num, seen_before) = self.number_for_add(*op);
                    self.set_number_for_value(Value::register(*reg), num);
                    if seen_before {
                        let earlier = self.value_for_number(num);
                        *op = Operation::simple(earlier);
                    }
                } else {
                    let num = self.number_for_value_or_create(op.lhs);
                    self.set_number_for_value(Value::register(*reg), num);
                }
            }
        }
    }
}

/// Run LVN over every block of `cfg` independently (value numbers do not
/// cross block boundaries).
pub fn apply_to_cfg(cfg: &mut crate::ir::Cfg) {
    let mut lvn = Lvn::new();
    for bb in cfg.blocks_mut() {
        lvn.clear();
        lvn.apply(bb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::parser::parse_str;
    use crate::ir::BlockId;

    #[test]
    fn redundant_add_becomes_a_copy() {
        // Scenario E from spec.md §8.
        let src = "\
.0:
  %1 <- 3
  %2 <- 4
  %3 <- %1 + %2
  %4 <- %1 + %2
  BR .0
";
        let mut cfg = parse_str(src).unwrap();
        apply_to_cfg(&mut cfg);
        let insts = &cfg.block(BlockId(0)).insts;
        match &insts[3] {
            crate::ir::Instruction::Def { reg, op } => {
                assert_eq!(*reg, 4);
                assert_eq!(op.kind, OperationKind::Simple);
                assert_eq!(op.lhs, Value::register(3));
            }
            other => panic!("expected a Def, got {other:?}"),
        }
    }

    #[test]
    fn distinct_adds_are_left_alone() {
        let src = "\
.0:
  %1 <- 3
  %2 <- 4
  %3 <- %1 + %2
  %4 <- %2 + %1
  BR .0
";
        let mut cfg = parse_str(src).unwrap();
        apply_to_cfg(&mut cfg);
        let insts = &cfg.block(BlockId(0)).insts;
        match &insts[3] {
            crate::ir::Instruction::Def { op, .. } => assert_eq!(op.kind, OperationKind::Add),
            other => panic!("expected a Def, got {other:?}"),
        }
    }
}
