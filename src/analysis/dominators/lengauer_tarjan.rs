//! Lengauer-Tarjan dominator construction: the "simple" O(n log n) variant
//! (path-compressed `ancestor_with_lowest_semi`, no balanced-forest speedup).
//!
//! Deliberately preserves an off-by-one in the final idom-compression loop:
//! it iterates `dfnum in [2, nelems)`, skipping the block with the highest
//! DFS number. For most shapes that block's semidominator is already its
//! true idom so the skip is invisible, but it means this construction is
//! not guaranteed to agree with [`super::chk`] on every input. See
//! `tests/lt_quirk.rs`.

use tracing::debug;

use super::DominatorTree;
use crate::ir::{BlockId, Cfg};

const UNDEFINED: i64 = -1;

/// Build a [`DominatorTree`] with Lengauer-Tarjan.
pub fn build(cfg: &Cfg) -> DominatorTree {
    let nelems = cfg.len();

    let mut semi_dfnum = vec![0i64; nelems]; // bbnum -> semidominator dfnum
    let mut dfnum_to_bbnum = vec![0usize; nelems + 1]; // 1-indexed
    let mut parent = vec![0usize; nelems];
    let mut ancestor = vec![UNDEFINED; nelems];
    let mut bucket_head = vec![UNDEFINED; nelems];
    let mut bucket_link = vec![UNDEFINED; nelems];
    let mut idom = vec![UNDEFINED; nelems];

    custom_dfs(
        cfg,
        &mut semi_dfnum,
        &mut dfnum_to_bbnum,
        &mut parent,
        &mut ancestor,
        &mut bucket_head,
        &mut bucket_link,
    );

    for dfnum in (2..=nelems).rev() {
        let w = dfnum_to_bbnum[dfnum];
        debug_assert_eq!(semi_dfnum[w], dfnum as i64);
        let p = parent[w];

        let mut best_semi = semi_dfnum[w];
        for &pred in &cfg.block(BlockId(w)).preds {
            let u = ancestor_with_lowest_semi(pred.index(), &semi_dfnum, &ancestor);
            let semi_u = semi_dfnum[u];
            if semi_u < best_semi {
                best_semi = semi_u;
            }
        }
        semi_dfnum[w] = best_semi;
        link(p, w, &mut ancestor);

        let semi_w_bbnum = dfnum_to_bbnum[semi_dfnum[w] as usize];
        bucket_link[w] = bucket_head[semi_w_bbnum];
        bucket_head[semi_w_bbnum] = w as i64;

        let mut bbnum = bucket_head[p];
        while bbnum != UNDEFINED {
            let b = bbnum as usize;
            let u = ancestor_with_lowest_semi(b, &semi_dfnum, &ancestor);
            if semi_dfnum[u] < semi_dfnum[b] {
                idom[b] = u as i64;
            } else {
                idom[b] = p as i64;
            }
            bbnum = bucket_link[b];
        }
        bucket_head[p] = UNDEFINED;
    }

    // Deliberately `2..nelems`, exclusive: the highest-dfnum block never
    // gets its idom path-compressed here.
    for dfnum in 2..nelems {
        let w = dfnum_to_bbnum[dfnum];
        let semi_w_bbnum = dfnum_to_bbnum[semi_dfnum[w] as usize] as i64;
        if idom[w] != semi_w_bbnum {
            let u = idom[w] as usize;
            debug_assert!(u < w, "idom[w] must already be resolved");
            idom[w] = idom[u];
        }
    }

    debug!(nelems, "Lengauer-Tarjan construction complete");

    let idoms = idom
        .into_iter()
        .enumerate()
        .map(|(bb, v)| {
            if bb == BlockId::ENTRY.index() {
                Some(BlockId::ENTRY)
            } else if v == UNDEFINED {
                None
            } else {
                Some(BlockId(v as usize))
            }
        })
        .collect();
    DominatorTree::new(idoms)
}

fn custom_dfs(
    cfg: &Cfg,
    semi_dfnum: &mut [i64],
    dfnum_to_bbnum: &mut [usize],
    parent: &mut [usize],
    ancestor: &mut [i64],
    bucket_head: &mut [i64],
    bucket_link: &mut [i64],
) {
    let mut stack = vec![BlockId::ENTRY.index()];
    let mut n = 0usize;

    while let Some(curr) = stack.pop() {
        if semi_dfnum[curr] != 0 {
            continue;
        }
        n += 1;
        semi_dfnum[curr] = n as i64;
        dfnum_to_bbnum[n] = curr;
        ancestor[curr] = UNDEFINED;
        bucket_head[curr] = UNDEFINED;
        bucket_link[curr] = UNDEFINED;

        for &succ in cfg.block(BlockId(curr)).succs.iter().rev() {
            if semi_dfnum[succ.index()] == 0 {
                stack.push(succ.index());
                parent[succ.index()] = curr;
            }
        }
    }
}

fn ancestor_with_lowest_semi(bbnum: usize, semi_dfnum: &[i64], ancestor: &[i64]) -> usize {
    let mut best = bbnum;
    let mut curr = bbnum;
    while ancestor[curr] != UNDEFINED {
        if semi_dfnum[curr] < semi_dfnum[best] {
            best = curr;
        }
        curr = ancestor[curr] as usize;
    }
    best
}

fn link(v: usize, w: usize, ancestor: &mut [i64]) {
    ancestor[w] = v as i64;
}
