/// Compute the index a dragged item would land on if released now.
///
/// The scan always starts next to `origin` (the index captured at drag start)
/// and walks in the direction of the accumulated `offset`. An item is passed
/// once the offset crosses its midpoint, measured cumulatively from the
/// origin. Items with no recorded height are skipped without ending the scan;
/// the first measured item whose midpoint is not crossed ends it.
///
/// `height_of` returns the last measured height for an index, if any.
pub fn compute_target(
    origin: usize,
    offset: f32,
    len: usize,
    height_of: impl Fn(usize) -> Option<f32>,
) -> usize {
    let mut target = origin;
    let mut consumed = 0.0_f32;

    if offset > 0.0 {
        for i in origin.saturating_add(1)..len {
            let Some(height) = height_of(i) else {
                continue;
            };
            if offset > consumed + height / 2.0 {
                consumed += height;
                target = i;
            } else {
                break;
            }
        }
    } else if offset < 0.0 {
        for i in (0..origin.min(len)).rev() {
            let Some(height) = height_of(i) else {
                continue;
            };
            if offset < -(consumed + height / 2.0) {
                consumed += height;
                target = i;
            } else {
                break;
            }
        }
    }

    target
}
