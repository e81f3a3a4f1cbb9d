//! A generic A* search over any node type. Nodes live in an arena and refer to their
//! predecessor by index, so the path can be rebuilt after the frontier is dropped.
//!
//! A node is expanded at most once: once it is in the closed set, later heap entries for it
//! are discarded and it is never pushed again. Entries already on the heap are not updated
//! when a cheaper route is found, the cheaper route is simply pushed as well.
use fxhash::FxHashSet;
use log::{debug, warn};
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

/// One evaluated node. `f` is derived from `g` and `h` on demand and never stored.
#[derive(Clone, Debug)]
struct SearchNode<N, C> {
    node: N,
    g: C,
    h: C,
    parent: Option<usize>,
}

impl<N, C: Add<Output = C> + Copy> SearchNode<N, C> {
    fn f(&self) -> C {
        self.g + self.h
    }
}

/// Heap entry pointing into the arena. The arena index doubles as the insertion sequence.
struct SmallestCostHolder<C> {
    estimated_cost: C,
    cost: C,
    index: usize,
}

impl<C: PartialEq> Eq for SmallestCostHolder<C> {}

impl<C: PartialEq> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.index == other.index
    }
}

impl<C: Ord> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: lowest estimate first, then the node furthest along,
        // then the earliest pushed.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

fn reverse_path<N: Clone, C>(arena: &[SearchNode<N, C>], end: usize) -> Vec<N> {
    let mut path: Vec<N> = std::iter::successors(Some(end), |&i| arena[i].parent)
        .map(|i| arena[i].node.clone())
        .collect();
    path.reverse();
    path
}

/// Runs A* from `start` until `success` accepts a popped node.
///
/// `successors` yields neighbours together with the cost of moving onto them and
/// `heuristic` must not overestimate the remaining cost. If `budget` is set, at most that
/// many nodes are expanded before giving up. Returns the path (start and goal inclusive)
/// with its total cost, or [None] if no accepted node is reachable.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    budget: Option<usize>,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut arena = vec![SearchNode {
        node: start.clone(),
        g: Zero::zero(),
        h: heuristic(start),
        parent: None,
    }];
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: arena[0].f(),
        cost: Zero::zero(),
        index: 0,
    });
    let mut closed: FxHashSet<N> = FxHashSet::default();
    let mut expanded = 0usize;

    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let current = arena[index].node.clone();
        if success(&current) {
            debug!(
                "Goal reached after {} expansions, {} nodes generated",
                expanded,
                arena.len()
            );
            return Some((reverse_path(&arena, index), cost));
        }
        // Stale duplicate of a node that was already expanded through a cheaper entry.
        if closed.contains(&current) {
            continue;
        }
        if budget.is_some_and(|b| expanded >= b) {
            warn!("Expansion budget of {} exhausted, giving up", expanded);
            return None;
        }
        expanded += 1;
        for (successor, move_cost) in successors(&current) {
            if closed.contains(&successor) {
                continue;
            }
            let h = heuristic(&successor);
            let node = SearchNode {
                node: successor,
                g: cost + move_cost,
                h,
                parent: Some(index),
            };
            to_see.push(SmallestCostHolder {
                estimated_cost: node.f(),
                cost: node.g,
                index: arena.len(),
            });
            arena.push(node);
        }
        closed.insert(current);
    }
    debug!(
        "Frontier exhausted after {} expansions, {} nodes generated",
        expanded,
        arena.len()
    );
    None
}
