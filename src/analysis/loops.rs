//! Natural-loop discovery: one loop per back edge `latch -> header`, where
//! `header` dominates `latch`.

use crate::analysis::dominators::DominatorTree;
use crate::ir::{BlockId, Cfg};

/// A single natural loop induced by the back edge `latch -> header`.
#[derive(Debug, Clone)]
pub struct Loop {
    pub header: BlockId,
    pub latch: BlockId,
    /// Every block in the loop body, including `header` and `latch`.
    pub body: Vec<BlockId>,
}

impl Loop {
    pub fn contains(&self, bb: BlockId) -> bool {
        self.body.contains(&bb)
    }

    fn construct(cfg: &Cfg, header: BlockId, latch: BlockId) -> Self {
        let mut body = vec![header];
        let mut stack = vec![latch];
        while let Some(p) = stack.pop() {
            if body.contains(&p) {
                continue;
            }
            body.push(p);
            for &pred in &cfg.block(p).preds {
                stack.push(pred);
            }
        }
        Loop {
            header,
            latch,
            body,
        }
    }
}

/// Every natural loop in `cfg`, one per qualifying back edge. Two loops may
/// share a header (spec.md §9): they are reported separately, not merged.
pub fn find_loops(cfg: &Cfg, dtree: &DominatorTree) -> Vec<Loop> {
    let mut loops = Vec::new();
    for header in cfg.block_ids() {
        for &latch in &cfg.block(header).preds {
            if dtree.dominates(header, latch) && dtree.reachable_from_entry(latch) {
                loops.push(Loop::construct(cfg, header, latch));
            }
        }
    }
    loops
}
