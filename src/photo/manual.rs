use entity::Photo;
use itertools::Itertools;

/// Whether a collection already carries a complete, contiguous persisted
/// order.
///
/// Intentionally conservative: all-null orders, duplicates such as
/// `{0, 0, 1}` and sparse sets such as `{0, 2, 3}` are not manual and fall
/// through to the intelligent ordering. Empty collections are never manual.
pub fn is_manual_order(photos: &[Photo]) -> bool {
    if photos.is_empty() {
        return false;
    }
    let Some(orders) = photos.iter().map(|p| p.order).collect::<Option<Vec<_>>>() else {
        return false;
    };
    orders
        .into_iter()
        .sorted_unstable()
        .enumerate()
        .all(|(index, order)| order == index as u32)
}
