//! Dominance frontiers: for each block `n`, the set of blocks where `n`'s
//! dominance "stops" — join points reachable from `n` without `n`
//! dominating them.

use crate::analysis::dominators::DominatorTree;
use crate::bitset::Bitset;
use crate::ir::{BlockId, Cfg};

/// `DF[n]` is the dominance frontier of block `n`.
#[derive(Debug, Clone)]
pub struct DominanceFrontiers {
    df: Vec<Bitset>,
}

impl DominanceFrontiers {
    pub fn frontier_of(&self, n: BlockId) -> &Bitset {
        &self.df[n.index()]
    }
}

fn is_join_point(cfg: &Cfg, bb: BlockId) -> bool {
    cfg.block(bb).preds.len() > 1
}

/// Compute dominance frontiers for every block of `cfg`, given its
/// already-built dominator tree.
pub fn compute(cfg: &Cfg, dtree: &DominatorTree) -> DominanceFrontiers {
    let nbbs = cfg.len();
    debug_assert_eq!(dtree.size(), nbbs);

    let mut df: Vec<Bitset> = (0..nbbs).map(|_| Bitset::new(nbbs)).collect();

    for n in cfg.block_ids() {
        if !is_join_point(cfg, n) {
            continue;
        }
        let idom_of_n = dtree.idom(n);
        for &pred in &cfg.block(n).preds {
            let mut runner = Some(pred);
            while runner != idom_of_n {
                let r = runner.expect("dominance frontier walk reached an undefined idom");
                df[r.index()].add(n.index());
                runner = dtree.idom(r);
            }
        }
    }

    DominanceFrontiers { df }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::dominators::chk;

    #[test]
    fn diamond_join_point_is_its_own_predecessors_frontier() {
        let mut cfg = Cfg::new();
        for _ in 0..4 {
            cfg.add_block();
        }
        cfg.add_edge(BlockId(0), BlockId(1));
        cfg.add_edge(BlockId(0), BlockId(2));
        cfg.add_edge(BlockId(1), BlockId(3));
        cfg.add_edge(BlockId(2), BlockId(3));

        let dtree = chk::build(&cfg);
        let df = compute(&cfg, &dtree);
        assert!(df.frontier_of(BlockId(0)).is_empty());
        assert_eq!(df.frontier_of(BlockId(1)).iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(df.frontier_of(BlockId(2)).iter().collect::<Vec<_>>(), vec![3]);
        assert!(df.frontier_of(BlockId(3)).is_empty());
    }

    #[test]
    fn loop_header_is_in_its_own_frontier_via_latch() {
        let mut cfg = Cfg::new();
        for _ in 0..3 {
            cfg.add_block();
        }
        cfg.add_edge(BlockId(0), BlockId(1));
        cfg.add_edge(BlockId(1), BlockId(2));
        cfg.add_edge(BlockId(2), BlockId(1));
        let dtree = chk::build(&cfg);
        let df = compute(&cfg, &dtree);
        assert_eq!(df.frontier_of(BlockId(2)).iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(df.frontier_of(BlockId(1)).iter().collect::<Vec<_>>(), vec![1]);
    }
}
