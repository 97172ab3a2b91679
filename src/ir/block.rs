//! Basic blocks and the [`BlockId`] newtype that indexes them.

use std::fmt;

use super::instruction::Instruction;

/// Index of a basic block within a [`crate::ir::cfg::Cfg`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

impl BlockId {
    /// The entry block is always index 0.
    pub const ENTRY: BlockId = BlockId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for BlockId {
    fn from(value: usize) -> Self {
        BlockId(value)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.0)
    }
}

/// A straight-line sequence of instructions with the predecessor/successor
/// lists needed to traverse the CFG.
///
/// `preds` and `succs` may contain duplicates (a `BrCond` whose `then` and
/// `els` targets coincide produces two entries for the same neighbour);
/// every consumer must tolerate that multiplicity rather than assume a set.
#[derive(Debug, Clone, Default)]
pub struct BasicBlock {
    pub id: BlockId,
    pub preds: Vec<BlockId>,
    pub succs: Vec<BlockId>,
    pub insts: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(id: BlockId) -> Self {
        BasicBlock {
            id,
            preds: Vec::new(),
            succs: Vec::new(),
            insts: Vec::new(),
        }
    }

    pub fn terminator(&self) -> Option<&Instruction> {
        self.insts.last().filter(|i| i.is_terminator())
    }
}
