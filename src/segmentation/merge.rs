use log::trace;

/// Collapse raw candidates into the final boundary set.
///
/// Candidates below `min_height` are dropped, the rest sorted, and within
/// each cluster only the topmost survives: a value is kept only if it lies
/// strictly more than `merge_threshold` rows below the last kept value.
pub fn merge_candidates(candidates: &[u32], merge_threshold: u32, min_height: u32) -> Vec<u32> {
    let mut sorted: Vec<u32> = candidates
        .iter()
        .copied()
        .filter(|&c| c >= min_height)
        .collect();
    sorted.sort_unstable();

    let mut kept: Vec<u32> = Vec::with_capacity(sorted.len());
    for value in sorted {
        match kept.last() {
            Some(&last) if value - last <= merge_threshold => {
                trace!("merge: dropping {} (within {} of {})", value, merge_threshold, last);
            }
            _ => kept.push(value),
        }
    }
    kept
}
