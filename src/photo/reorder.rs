//! Pure reorder mutations for the admin editing session.
//!
//! Every operation returns a fresh collection with `order` rewritten to the
//! contiguous 0..N permutation. Invalid targets are silent no-ops returning
//! the input unchanged: they come from stale UI state after a concurrent
//! removal, not from programming errors.

use entity::{Featured, Photo};

use super::{mint_code, renumber, IntelligentOrderer, OrderCache};

/// One step of movement in the editing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Move the photo with `code` to `target_index`, shifting everything in
/// between.
pub fn move_to_position(photos: &[Photo], code: &str, target_index: usize) -> Vec<Photo> {
    let Some(current) = photos.iter().position(|p| p.code == code) else {
        return photos.to_vec();
    };
    if target_index >= photos.len() || target_index == current {
        return photos.to_vec();
    }
    let mut reordered = photos.to_vec();
    let photo = reordered.remove(current);
    reordered.insert(target_index, photo);
    renumber(&mut reordered);
    reordered
}

/// Move one position up or down, clamped: moving the first photo up or the
/// last photo down is a no-op.
pub fn move_by_step(photos: &[Photo], code: &str, direction: Direction) -> Vec<Photo> {
    let Some(current) = photos.iter().position(|p| p.code == code) else {
        return photos.to_vec();
    };
    let target = match direction {
        Direction::Up => current.saturating_sub(1),
        Direction::Down => (current + 1).min(photos.len() - 1),
    };
    move_to_position(photos, code, target)
}

/// Mark `code` as the cover photo and clear the mark everywhere else.
///
/// Position is orthogonal: callers that also want the cover shown first
/// follow up with `move_to_position(photos, code, 0)`.
pub fn set_featured(photos: &[Photo], code: &str) -> Vec<Photo> {
    if !photos.iter().any(|p| p.code == code) {
        return photos.to_vec();
    }
    photos
        .iter()
        .cloned()
        .map(|mut photo| {
            photo.featured = if photo.code == code {
                Featured::Sim
            } else {
                Featured::Nao
            };
            photo
        })
        .collect()
}

/// Delete the photo with `code` and close the gap in the numbering.
pub fn remove(photos: &[Photo], code: &str) -> Vec<Photo> {
    if !photos.iter().any(|p| p.code == code) {
        return photos.to_vec();
    }
    let mut remaining: Vec<Photo> = photos.iter().filter(|p| p.code != code).cloned().collect();
    renumber(&mut remaining);
    remaining
}

/// The "Limpar Tudo" action: drop every photo.
pub fn remove_all(_photos: &[Photo]) -> Vec<Photo> {
    Vec::new()
}

/// Append a photo at the end of the collection with a freshly minted code.
pub fn add(photos: &[Photo], url: &str) -> Vec<Photo> {
    let mut extended = photos.to_vec();
    extended.push(Photo::new(mint_code(photos.len()), url));
    renumber(&mut extended);
    extended
}

/// Discard any persisted or session ordering and recompute from scratch.
/// The result becomes the new session override.
pub fn reset<C: OrderCache>(
    photos: &[Photo],
    property_code: &str,
    orderer: &IntelligentOrderer<C>,
) -> Vec<Photo> {
    orderer.invalidate(property_code);
    orderer.compute_order(photos, property_code)
}
