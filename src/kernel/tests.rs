use super::*;
use std::collections::HashSet;

fn scalar_grid(w: usize, h: usize, f: impl Fn(usize, usize) -> f64) -> FeatureGrid {
    let mut data = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            data.push(f(x, y));
        }
    }
    FeatureGrid::from_scalar(w, h, data).unwrap()
}

/// Smooth ramp with a sharp step at `split_x`.
fn ramp_with_step(w: usize, h: usize, split_x: usize) -> FeatureGrid {
    scalar_grid(w, h, |x, y| {
        let base = 0.3 * x as f64 + 0.2 * y as f64;
        if x < split_x {
            base
        } else {
            base + 40.0
        }
    })
}

fn raw_params(kernel_size: f64, max_dist: f64) -> QuickshiftParams {
    QuickshiftParams {
        kernel_size,
        max_dist,
        convert2lab: false,
        ..Default::default()
    }
    .with_seed(42)
}

#[test]
fn constant_grid_yields_single_segment() {
    let features = scalar_grid(4, 4, |_, _| 0.5);
    let params = QuickshiftParams {
        ratio: 1.0,
        kernel_size: 5.0,
        max_dist: 100.0,
        sigma: 0.0,
        convert2lab: false,
        ..Default::default()
    };
    for seed in [None, Some(1), Some(2)] {
        let seg = segment(
            &features,
            &QuickshiftParams {
                random_seed: seed,
                ..params
            },
        )
        .unwrap();
        assert_eq!(seg.num_segments, 1, "seed {seed:?}");
        assert!(seg.labels.data.iter().all(|&l| l == 0));
        assert_eq!(seg.labels.data.len(), 16);
    }
}

#[test]
fn feature_jump_below_max_dist_splits() {
    let features = FeatureGrid::from_scalar(2, 2, vec![100.0, 0.0, 0.0, 100.0]).unwrap();
    let seg = segment(&features, &raw_params(5.0, 0.5)).unwrap();
    assert!(seg.num_segments >= 2, "got {}", seg.num_segments);
    let distinct: HashSet<_> = seg.labels.data.iter().copied().collect();
    assert_eq!(distinct.len(), seg.num_segments);
}

#[test]
fn labels_are_dense_and_in_range() {
    let features = ramp_with_step(12, 9, 5);
    let seg = segment(&features, &raw_params(1.5, 3.0)).unwrap();
    let distinct: HashSet<_> = seg.labels.data.iter().copied().collect();
    assert_eq!(distinct.len(), seg.num_segments);
    assert!(seg.labels.data.iter().all(|&l| l < seg.num_segments));
    assert_eq!(distinct, (0..seg.num_segments).collect::<HashSet<_>>());
}

#[test]
fn seeded_runs_are_bit_identical() {
    let features = ramp_with_step(10, 8, 4);
    let params = raw_params(1.0, 2.0).with_tree(true);
    let a = segment(&features, &params).unwrap();
    let b = segment(&features, &params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn tree_has_valid_parents_and_finite_distances() {
    let features = ramp_with_step(9, 7, 3);
    let seg = segment(&features, &raw_params(1.0, 1.5).with_tree(true)).unwrap();
    let tree = seg.tree.expect("tree requested");
    let n = features.len();
    assert!(tree.parents.data.iter().all(|&p| p < n));
    assert!(tree
        .distances
        .data
        .iter()
        .all(|d| d.is_finite() && *d >= 0.0));
}

#[test]
fn tree_absent_unless_requested() {
    let features = ramp_with_step(6, 6, 3);
    let seg = segment(&features, &raw_params(1.0, 2.0)).unwrap();
    assert!(seg.tree.is_none());
}

#[test]
fn long_links_are_truncated() {
    let features = ramp_with_step(10, 6, 5);
    let max_dist = 2.0;
    let seg = segment(&features, &raw_params(1.0, max_dist).with_tree(true)).unwrap();
    let tree = seg.tree.unwrap();
    for (i, (&p, &d)) in tree.parents.data.iter().zip(&tree.distances.data).enumerate() {
        if d > max_dist {
            assert_eq!(p, i, "cell {i} kept a link of length {d}");
        }
        if p != i {
            assert!(d <= max_dist);
        }
    }
}

#[test]
fn labels_follow_flattened_roots() {
    let features = ramp_with_step(8, 8, 4);
    let seg = segment(&features, &raw_params(1.0, 3.0).with_tree(true)).unwrap();
    let tree = seg.tree.unwrap();
    let roots = resolve_roots(&tree.parents).roots;
    assert!(is_flat(&roots));
    for i in 0..roots.data.len() {
        for j in 0..roots.data.len() {
            assert_eq!(
                roots.data[i] == roots.data[j],
                seg.labels.data[i] == seg.labels.data[j]
            );
        }
    }
    // Idempotence on the flattened forest.
    assert_eq!(resolve_roots(&roots).roots, roots);
}

#[test]
fn smaller_max_dist_never_merges_segments() {
    let features = ramp_with_step(12, 10, 6);
    let mut previous = 0;
    for max_dist in [50.0, 10.0, 3.0, 1.5, 1.0, 0.5] {
        let seg = segment(&features, &raw_params(1.0, max_dist)).unwrap();
        assert!(
            seg.num_segments >= previous,
            "max_dist {max_dist}: {} < {previous}",
            seg.num_segments
        );
        previous = seg.num_segments;
    }
}

#[test]
fn step_edge_separates_segments() {
    let features = ramp_with_step(10, 6, 5);
    let seg = segment(&features, &raw_params(1.0, 10.0)).unwrap();
    let mut left = HashSet::new();
    let mut right = HashSet::new();
    for y in 0..6 {
        for x in 0..10 {
            let label = seg.labels.get(x, y);
            if x < 5 {
                left.insert(label);
            } else {
                right.insert(label);
            }
        }
    }
    assert!(left.is_disjoint(&right), "left {left:?} right {right:?}");
}

#[test]
fn ratio_scales_feature_term() {
    // With ratio 0 only spatial distance matters, so the step disappears.
    let features = ramp_with_step(6, 6, 3);
    let params = QuickshiftParams {
        ratio: 0.0,
        ..raw_params(5.0, 100.0)
    };
    let seg = segment(&features, &params).unwrap();
    assert_eq!(seg.num_segments, 1);
}

#[test]
fn kernel_entry_matches_full_entry_without_preprocessing() {
    let features = ramp_with_step(7, 5, 3);
    let params = raw_params(1.0, 2.0).with_tree(true);
    let full = segment(&features, &params).unwrap();
    let kernel = run_quickshift(&features, 1.0, 2.0, true, Some(42)).unwrap();
    assert_eq!(full, kernel);
}

#[test]
fn rgb_input_with_lab_and_smoothing() {
    let (w, h) = (8, 6);
    let mut data = Vec::with_capacity(w * h * 3);
    for _y in 0..h {
        for x in 0..w {
            if x < w / 2 {
                data.extend_from_slice(&[0.9, 0.1, 0.1]);
            } else {
                data.extend_from_slice(&[0.1, 0.2, 0.9]);
            }
        }
    }
    let image = FeatureGrid::from_vec(w, h, 3, data).unwrap();
    let params = QuickshiftParams {
        kernel_size: 1.0,
        max_dist: 6.0,
        sigma: 0.5,
        ..Default::default()
    }
    .with_seed(3);
    let report = segment_with_report(&image, &params).unwrap();
    assert!(report.segmentation.num_segments >= 2);
    assert_ne!(
        report.segmentation.labels.get(0, 0),
        report.segmentation.labels.get(w - 1, 0)
    );
    for stage in ["lab", "smooth", "density", "link", "flatten", "relabel"] {
        assert!(report.timings.stage_ms(stage).is_some(), "missing {stage}");
    }
    // Input is left untouched.
    assert_eq!(image.pixel(0, 0), &[0.9, 0.1, 0.1]);
}

#[test]
fn kernel_size_below_one_is_rejected() {
    let features = scalar_grid(3, 3, |_, _| 0.0);
    let params = QuickshiftParams {
        kernel_size: 0.5,
        convert2lab: false,
        ..Default::default()
    };
    assert_eq!(
        segment(&features, &params),
        Err(QuickshiftError::InvalidKernelSize(0.5))
    );
    assert!(matches!(
        run_quickshift(&features, f64::NAN, 10.0, false, None),
        Err(QuickshiftError::InvalidKernelSize(_))
    ));
}

#[test]
fn lab_on_single_channel_is_rejected() {
    let features = scalar_grid(3, 3, |_, _| 0.0);
    let err = segment(&features, &QuickshiftParams::default()).unwrap_err();
    assert_eq!(
        err,
        QuickshiftError::ChannelMismatch {
            expected: 3,
            actual: 1
        }
    );
}

#[test]
fn negative_sigma_is_rejected() {
    let features = scalar_grid(3, 3, |_, _| 0.0);
    let params = QuickshiftParams {
        sigma: -1.0,
        convert2lab: false,
        ..Default::default()
    };
    assert_eq!(
        segment(&features, &params),
        Err(QuickshiftError::InvalidSigma(-1.0))
    );
}

#[test]
fn empty_grid_yields_no_segments() {
    let features = FeatureGrid::from_vec(0, 0, 1, Vec::new()).unwrap();
    let seg = segment(&features, &raw_params(1.0, 1.0)).unwrap();
    assert_eq!(seg.num_segments, 0);
    assert!(seg.labels.data.is_empty());
}

#[test]
fn huge_kernel_size_spans_whole_grid() {
    let features = FeatureGrid::from_scalar(3, 1, vec![0.0, 1.0, 2.0]).unwrap();
    for kernel_size in [1e19, f64::INFINITY] {
        let seg = run_quickshift(&features, kernel_size, 100.0, false, Some(1)).unwrap();
        assert_eq!(seg.num_segments, 1, "kernel_size {kernel_size}");
    }
}
