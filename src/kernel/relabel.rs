use crate::image::Grid;

/// Map root indices to dense labels `0..K`, ordered by ascending root index.
///
/// Returns the label grid and `K`. Every value of `roots` must be a valid
/// flattened index into the grid.
pub fn relabel(roots: &Grid<usize>) -> (Grid<usize>, usize) {
    let n = roots.data.len();
    let mut is_root = vec![false; n];
    for &r in &roots.data {
        is_root[r] = true;
    }
    let mut ids = vec![usize::MAX; n];
    let mut next = 0;
    for (id, _) in ids.iter_mut().zip(&is_root).filter(|(_, root)| **root) {
        *id = next;
        next += 1;
    }
    let labels = roots.data.iter().map(|&r| ids[r]).collect();
    (
        Grid {
            w: roots.w,
            h: roots.h,
            data: labels,
        },
        next,
    )
}
