//! Row/cell fan-out shared by the per-cell stages.
//!
//! With the `parallel` feature the closures run on the rayon pool; every task
//! writes only its own output row (or cell) and reads shared immutable inputs.

/// Fill `data` row by row; `f(y, row)` writes row `y` of a `w`-wide grid.
pub(crate) fn fill_rows<T, F>(data: &mut [T], w: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if w == 0 {
        return;
    }
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        data.chunks_mut(w).enumerate().for_each(|(y, row)| f(y, row));
    }
}

/// Fill `out[i] = f(i)` for every cell.
pub(crate) fn fill_cells<T, F>(out: &mut [T], f: F)
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_iter_mut().enumerate().for_each(|(i, v)| *v = f(i));
    }
    #[cfg(not(feature = "parallel"))]
    {
        out.iter_mut().enumerate().for_each(|(i, v)| *v = f(i));
    }
}
