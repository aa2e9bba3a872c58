//! Forest truncation and root resolution by pointer doubling.
//!
//! Truncation cuts every link longer than `max_dist`, turning the child into a
//! root. Resolution then repeats `parent(p) := parent(parent(p))` for all
//! cells at once until a round changes nothing. Each round reads the previous
//! generation and writes a separate buffer, so no cell ever sees a same-round
//! update. Chain lengths halve per round: O(log L) rounds for longest chain L.
use super::rows::fill_cells;
use crate::image::Grid;
use log::debug;

/// Result of resolving a parent forest to its roots.
#[derive(Clone, Debug, PartialEq)]
pub struct FlattenOutcome {
    /// Root index of every cell.
    pub roots: Grid<usize>,
    /// Pointer-doubling rounds executed, including the final unchanged one.
    pub rounds: usize,
}

/// Reset every link whose length exceeds `max_dist` to a self loop.
pub fn truncate(parents: &mut Grid<usize>, distances: &Grid<f64>, max_dist: f64) -> usize {
    debug_assert_eq!(parents.data.len(), distances.data.len());
    let mut cut = 0;
    for (i, (parent, &dist)) in parents.data.iter_mut().zip(&distances.data).enumerate() {
        if dist > max_dist {
            if *parent != i {
                cut += 1;
            }
            *parent = i;
        }
    }
    cut
}

/// Pointer doubling to a fixed point.
pub fn resolve_roots(parents: &Grid<usize>) -> FlattenOutcome {
    let mut current = parents.data.clone();
    let mut next = vec![0usize; current.len()];
    let mut rounds = 0;
    loop {
        {
            let snapshot = &current;
            fill_cells(&mut next, |i| snapshot[snapshot[i]]);
        }
        rounds += 1;
        let changed = next != current;
        std::mem::swap(&mut current, &mut next);
        if !changed {
            break;
        }
    }
    FlattenOutcome {
        roots: Grid {
            w: parents.w,
            h: parents.h,
            data: current,
        },
        rounds,
    }
}

/// Truncate a copy of `parents` at `max_dist` and resolve it to roots.
///
/// Returns the truncated (not yet flattened) forest alongside the outcome.
pub fn flatten(
    parents: &Grid<usize>,
    distances: &Grid<f64>,
    max_dist: f64,
) -> (Grid<usize>, FlattenOutcome) {
    let mut truncated = parents.clone();
    let cut = truncate(&mut truncated, distances, max_dist);
    let outcome = resolve_roots(&truncated);
    debug!(
        "flatten: cut {} links above {:.3}, {} doubling rounds",
        cut, max_dist, outcome.rounds
    );
    (truncated, outcome)
}

/// True when every cell points directly at a root.
pub fn is_flat(parents: &Grid<usize>) -> bool {
    parents
        .data
        .iter()
        .all(|&p| parents.data[p] == p)
}
