//! Moore-neighborhood enumeration shared by the 2D and 3D engines

use itertools::Itertools;

/// In-bounds coordinates along one axis within distance 1 of `at`.
///
/// `extent` must be non-zero; grid constructors enforce that.
fn axis_window(at: usize, extent: usize) -> Vec<usize> {
    let lo = at.saturating_sub(1);
    let hi = (at + 1).min(extent - 1);
    (lo..=hi).collect()
}

/// Enumerate the in-bounds Moore neighbors of `point` on a lattice of the
/// given per-axis `extent`.
///
/// The point itself is excluded and offsets falling outside
/// `[0, extent)` on any axis are omitted, never wrapped. Yields up to
/// `3^N - 1` coordinates (8 in 2D, 26 in 3D).
pub fn moore_neighbors<const N: usize>(
    point: [usize; N],
    extent: [usize; N],
) -> impl Iterator<Item = [usize; N]> {
    let windows: Vec<Vec<usize>> = point
        .iter()
        .zip(extent.iter())
        .map(|(&at, &ext)| axis_window(at, ext))
        .collect();

    windows
        .into_iter()
        .multi_cartesian_product()
        .filter_map(move |coords| {
            let mut neighbor = [0usize; N];
            neighbor.copy_from_slice(&coords);
            (neighbor != point).then_some(neighbor)
        })
}

/// Count alive cells among the in-bounds Moore neighbors of `point`.
pub fn count_alive<const N: usize>(
    point: [usize; N],
    extent: [usize; N],
    mut alive: impl FnMut([usize; N]) -> bool,
) -> u8 {
    moore_neighbors(point, extent).filter(|&p| alive(p)).count() as u8
}
