//! Deciding and mutating the display order of a property's photo collection.

use entity::Photo;
use time::OffsetDateTime;

mod intelligent;
mod manual;
mod reconcile;
mod reorder;
mod resolve;
mod signature;

pub use intelligent::*;
pub use manual::*;
pub use reconcile::*;
pub use reorder::*;
pub use resolve::*;
pub use signature::*;

// New photos get `photo-<unix-millis>-<index>`, the shape of every code the
// admin panel has ever minted.
pub(crate) fn mint_code(index: usize) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("photo-{millis}-{index}")
}

// Rewrite every `order` to the photo's current index, restoring the
// contiguous 0..N permutation.
pub(crate) fn renumber(photos: &mut [Photo]) {
    for (index, photo) in photos.iter_mut().enumerate() {
        photo.order = Some(index as u32);
    }
}
