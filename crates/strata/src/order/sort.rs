use super::{SortEntry, SortResult};
use std::cmp::Ordering;

/// Orders entries by barycenter, keeping entries without one at their original position.
///
/// Ties go to the lower input position, or the higher one when `bias_right` is set.
pub fn sort(entries: Vec<SortEntry>, bias_right: bool) -> SortResult {
    let (mut sortable, mut unsortable): (Vec<SortEntry>, Vec<SortEntry>) =
        entries.into_iter().partition(|e| e.barycenter.is_some());
    // Popped from the back, so smallest position last.
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| {
        let (ba, bb) = (a.barycenter.unwrap_or(0.0), b.barycenter.unwrap_or(0.0));
        ba.partial_cmp(&bb)
            .filter(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| if bias_right { b.i.cmp(&a.i) } else { a.i.cmp(&b.i) })
    });

    let mut vs = Vec::new();
    let mut sum = 0.0;
    let mut weight = 0.0;
    let mut index = consume_unsortable(&mut vs, &mut unsortable, 0);
    for entry in sortable {
        index += entry.vs.len();
        vs.extend(entry.vs);
        let w = entry.weight.unwrap_or(0.0);
        sum += entry.barycenter.unwrap_or(0.0) * w;
        weight += w;
        index = consume_unsortable(&mut vs, &mut unsortable, index);
    }
    // Whatever is left was positioned past the end.
    while let Some(entry) = unsortable.pop() {
        vs.extend(entry.vs);
    }

    if weight != 0.0 {
        SortResult {
            vs,
            barycenter: Some(sum / weight),
            weight: Some(weight),
        }
    } else {
        SortResult {
            vs,
            barycenter: None,
            weight: None,
        }
    }
}

fn consume_unsortable(
    vs: &mut Vec<String>,
    unsortable: &mut Vec<SortEntry>,
    mut index: usize,
) -> usize {
    while unsortable.last().is_some_and(|e| e.i <= index) {
        if let Some(entry) = unsortable.pop() {
            vs.extend(entry.vs);
            index += 1;
        }
    }
    index
}
