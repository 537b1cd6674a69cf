//! Grid transfers, operator coarsening and single-cycle behaviour.
//!
//! These tests exercise the building blocks of a cycle in isolation: the restriction and
//! prolongation pair, the terminal solve, the operator hierarchy, and one V-cycle against a
//! smoother-only baseline.

use approx::assert_abs_diff_eq;
use gmg::config::CycleOptions;
use gmg::core::grid::Grid;
use gmg::cycle::{Cycle, CycleEngine, StencilCycle};
use gmg::matrix::poisson_1d;
use gmg::operator::{OperatorHierarchy, residual_norm};
use gmg::smoother::red_black_gauss_seidel;
use gmg::transfer::{prolong_1d, prolong_2d, restrict_1d, restrict_2d};
use rand::Rng;

fn energy(g: &Grid) -> f64 {
    g.interior().map(|v| v * v).sum()
}

/// A fine-grid impulse loses energy on the way to the coarse grid and back.
#[test]
fn restrict_then_prolong_is_low_pass() {
    let n = 16;
    let mut rng = rand::thread_rng();
    for _ in 0..10 {
        let i = rng.gen_range(1..n);
        let j = rng.gen_range(1..n);
        let mut fine = Grid::zeros(n);
        fine[(i, j)] = 1.0;

        let round_trip = prolong_2d(&restrict_2d(&fine), n);
        let ratio = energy(&round_trip) / energy(&fine);
        assert!(ratio < 1.0, "impulse at ({i}, {j}) kept energy ratio {ratio}");
        assert!(ratio > 0.0);
    }
}

/// 1D impulse: same low-pass behaviour on vectors of interior unknowns.
#[test]
fn restrict_then_prolong_is_low_pass_1d() {
    let m = 15;
    for k in 0..m {
        let mut fine = vec![0.0; m];
        fine[k] = 1.0;
        let back = prolong_1d(&restrict_1d(&fine), m);
        let e: f64 = back.iter().map(|v| v * v).sum();
        assert!(e < 1.0, "impulse at {k} kept energy {e}");
    }
}

/// Prolongation always returns the requested shape.
#[test]
fn prolongation_shapes() {
    for nc in [1, 2, 3, 4, 8, 16, 32] {
        let coarse = Grid::zeros(nc);
        let fine = prolong_2d(&coarse, 2 * nc);
        assert_eq!(fine.intervals(), 2 * nc);
        assert_eq!(fine.values().len(), (2 * nc + 1) * (2 * nc + 1));
    }
    for mc in [1, 3, 7, 15, 31] {
        let fine = prolong_1d(&vec![1.0; mc], 2 * mc + 1);
        assert_eq!(fine.len(), 2 * mc + 1);
    }
}

/// Smooth coarse data is interpolated exactly where it is linear.
#[test]
fn prolongation_reproduces_linear_data() {
    let nc = 4;
    let coarse = Grid::from_interior_fn(nc, |x, y| x + y);
    let fine = prolong_2d(&coarse, 2 * nc);
    // (2, 2) on the fine grid is (1, 1) on the coarse one
    assert_abs_diff_eq!(fine[(2, 2)], coarse[(1, 1)], epsilon = 1e-15);
    // (3, 3) sits in the middle of an interior coarse cell
    let expected = 0.25 * (coarse[(1, 1)] + coarse[(1, 2)] + coarse[(2, 1)] + coarse[(2, 2)]);
    assert_abs_diff_eq!(fine[(3, 3)], expected, epsilon = 1e-15);
}

/// With default options the terminal solve drives a well-conditioned coarse residual below 1e-3.
#[test]
fn terminal_solve_reaches_tolerance() {
    let ops = StencilCycle::new(&CycleOptions::default());
    for n in [2, 4, 8] {
        let h = 1.0 / n as f64;
        let f = Grid::from_interior_fn(n, |_, _| 1.0);
        let mut u = Grid::zeros(n);
        ops.solve(1, &f, &mut u, h).unwrap();
        let r = residual_norm(&f, &u, h);
        assert!(r < 1e-3, "n = {n}: terminal residual {r}");
    }
}

/// Rebuilding the hierarchy from the same fine operator gives identical coarse operators.
#[test]
fn hierarchy_rebuild_is_deterministic() {
    let fine = poisson_1d(31);
    let first = OperatorHierarchy::build(fine.clone(), 4).unwrap();
    let second = OperatorHierarchy::build(fine, 4).unwrap();
    assert_eq!(first.levels(), 4);
    for l in 1..=4 {
        let (a, b) = (first.get(l), second.get(l));
        assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
        for j in 0..a.ncols() {
            for i in 0..a.nrows() {
                assert_eq!(a[(i, j)].to_bits(), b[(i, j)].to_bits());
            }
        }
    }
    assert_eq!(first.get(1).nrows(), 3);
}

/// One V-cycle beats the smoother alone given more fine-grid sweeps than the cycle uses.
#[test]
fn cycle_beats_smoother_only_baseline() {
    for (n, levels) in [(8, 2), (16, 3), (32, 4), (64, 5)] {
        let h = 1.0 / n as f64;
        let f = Grid::from_interior_fn(n, |x, y| x * (1.0 - x) + y * (1.0 - y));
        let options = CycleOptions::new().with_levels(levels);

        let engine = CycleEngine::new(StencilCycle::new(&options), options.clone()).unwrap();
        let mut u_mg = Grid::zeros(n);
        engine.cycle(&f, &mut u_mg).unwrap();

        // a V(2,2) cycle spends v1 + v2 fine sweeps plus less than a third of that on coarser
        // levels and the terminal solve is a small grid
        let mut u_gs = Grid::zeros(n);
        red_black_gauss_seidel(&f, &mut u_gs, h, 2 * (options.v1 + options.v2), None);

        let r0 = residual_norm(&f, &Grid::zeros(n), h);
        let r_mg = residual_norm(&f, &u_mg, h);
        let r_gs = residual_norm(&f, &u_gs, h);
        assert!(r_mg < r_gs, "n = {n}, levels = {levels}: cycle {r_mg} vs smoother {r_gs}");
        assert!(r_mg < 0.2 * r0, "n = {n}, levels = {levels}: {r_mg} vs {r0}");
    }
}
