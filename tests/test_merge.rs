use shotsplit::segmentation::merge::merge_candidates;

#[test]
fn test_merge_empty() {
    assert!(merge_candidates(&[], 100, 200).is_empty());
}

#[test]
fn test_merge_single_value() {
    assert_eq!(merge_candidates(&[500], 100, 200), vec![500]);
}

#[test]
fn test_merge_filters_by_threshold() {
    let values = [100, 150, 400, 420, 800];
    assert_eq!(merge_candidates(&values, 100, 50), vec![100, 400, 800]);
}

#[test]
fn test_merge_filters_min_height() {
    let values = [50, 100, 500, 1000];
    assert_eq!(merge_candidates(&values, 50, 200), vec![500, 1000]);
}

#[test]
fn test_merge_everything_below_floor() {
    assert!(merge_candidates(&[10, 20, 199], 5, 200).is_empty());
    assert_eq!(merge_candidates(&[200], 5, 200), vec![200]);
}

#[test]
fn test_merge_sorts_input() {
    let sorted = [100, 200, 500, 800];
    let expected = merge_candidates(&sorted, 100, 0);

    let permutations: [[u32; 4]; 4] = [
        [800, 200, 500, 100],
        [500, 800, 100, 200],
        [200, 100, 800, 500],
        [800, 500, 200, 100],
    ];
    for p in permutations {
        assert_eq!(merge_candidates(&p, 100, 0), expected);
    }
    assert_eq!(expected, vec![100, 500, 800]);
}

#[test]
fn test_merge_gap_must_exceed_threshold() {
    assert_eq!(merge_candidates(&[200, 300], 100, 0), vec![200]);
    assert_eq!(merge_candidates(&[200, 301], 100, 0), vec![200, 301]);
}

#[test]
fn test_merge_first_in_cluster_wins() {
    // 290 falls to 200; 380 is measured from 200, not from 290
    assert_eq!(merge_candidates(&[200, 290, 380, 470], 100, 0), vec![200, 380]);
}

#[test]
fn test_merge_collapses_duplicates() {
    assert_eq!(merge_candidates(&[400, 400, 400], 0, 0), vec![400]);
}

#[test]
fn test_merge_output_is_spaced() {
    let values: Vec<u32> = (0..500).map(|i| (i * 7919) % 3001).collect();
    let merged = merge_candidates(&values, 37, 150);

    assert!(merged.iter().all(|&v| v >= 150));
    for pair in merged.windows(2) {
        assert!(pair[1] > pair[0] + 37);
    }
}
