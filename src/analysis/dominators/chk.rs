//! Cooper-Harvey-Kennedy: iterative dataflow construction of the dominator
//! tree, processing blocks in reverse postorder until `idom` stops changing.

use tracing::debug;

use super::DominatorTree;
use crate::analysis::postorder;
use crate::ir::{BlockId, Cfg};

/// Build a [`DominatorTree`] with the Cooper-Harvey-Kennedy fixed point.
pub fn build(cfg: &Cfg) -> DominatorTree {
    let postorder = postorder::postorder(cfg);
    let mut postorder_num = vec![0usize; cfg.len()];
    for (i, &block) in postorder.iter().enumerate() {
        postorder_num[block.index()] = i;
    }

    let mut idoms: Vec<Option<BlockId>> = vec![None; cfg.len()];
    idoms[BlockId::ENTRY.index()] = Some(BlockId::ENTRY);

    // Reverse-postorder, excluding the entry block (last in `postorder`).
    let mut changed = true;
    let mut pass = 0;
    while changed {
        changed = false;
        pass += 1;
        for &bb in postorder.iter().rev().skip(1) {
            let preds = &cfg.block(bb).preds;
            let mut new_idom = preds[0];
            for &pred in preds.iter().skip(1) {
                if idoms[pred.index()].is_some() {
                    new_idom = intersect(new_idom, pred, &idoms, &postorder_num);
                }
            }
            if idoms[bb.index()] != Some(new_idom) {
                idoms[bb.index()] = Some(new_idom);
                changed = true;
            }
        }
        debug!(pass, "CHK fixed-point pass");
    }

    DominatorTree::new(idoms)
}

/// Walk two candidate dominators up their (partially built) idom chains
/// until they meet, using postorder numbers to decide which side to step.
fn intersect(
    mut b1: BlockId,
    mut b2: BlockId,
    idoms: &[Option<BlockId>],
    postorder_num: &[usize],
) -> BlockId {
    while b1 != b2 {
        if postorder_num[b1.index()] < postorder_num[b2.index()] {
            b1 = idoms[b1.index()].expect("intersect walked off an undefined idom");
        } else {
            b2 = idoms[b2.index()].expect("intersect walked off an undefined idom");
        }
    }
    b1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Cfg {
        let mut cfg = Cfg::new();
        for _ in 0..4 {
            cfg.add_block();
        }
        cfg.add_edge(BlockId(0), BlockId(1));
        cfg.add_edge(BlockId(0), BlockId(2));
        cfg.add_edge(BlockId(1), BlockId(3));
        cfg.add_edge(BlockId(2), BlockId(3));
        cfg
    }

    #[test]
    fn diamond_join_point_is_dominated_by_entry() {
        let cfg = diamond();
        let dtree = build(&cfg);
        assert_eq!(dtree.idom(BlockId(3)), Some(BlockId(0)));
        assert_eq!(dtree.idom(BlockId(1)), Some(BlockId(0)));
        assert_eq!(dtree.idom(BlockId(2)), Some(BlockId(0)));
    }

    #[test]
    fn loop_header_dominates_body() {
        let mut cfg = Cfg::new();
        for _ in 0..3 {
            cfg.add_block();
        }
        cfg.add_edge(BlockId(0), BlockId(1));
        cfg.add_edge(BlockId(1), BlockId(2));
        cfg.add_edge(BlockId(2), BlockId(1));
        let dtree = build(&cfg);
        assert_eq!(dtree.idom(BlockId(2)), Some(BlockId(1)));
        assert!(dtree.dominates(BlockId(1), BlockId(2)));
    }
}
