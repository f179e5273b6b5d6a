use entity::Photo;
use itertools::Itertools;

use super::{is_manual_order, IntelligentOrderer, LruOrderCache, OrderCache};

/// How the currently displayed order was produced. Recomputed on every
/// resolve, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    SessionOverride,
    PersistedManual,
    ComputedIntelligent,
}

/// Precedence chain deciding what order to render: an unsaved session
/// reorder wins, then a persisted manual order, then the computed
/// intelligent order.
#[derive(Debug, Default)]
pub struct OrderResolver<C = LruOrderCache> {
    orderer: IntelligentOrderer<C>,
}

impl OrderResolver<LruOrderCache> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: OrderCache> OrderResolver<C> {
    pub fn with_orderer(orderer: IntelligentOrderer<C>) -> Self {
        Self { orderer }
    }

    pub fn orderer(&self) -> &IntelligentOrderer<C> {
        &self.orderer
    }

    /// Resolve the order for one render.
    ///
    /// A manual or session order is authoritative, including wherever it
    /// placed the featured photo; only the intelligent branch pins the cover
    /// first. Callers that want the cover shown first regardless apply
    /// [`pin_featured_for_display`] on the result.
    #[tracing::instrument(
        name = "Resolving photo order",
        level = "debug",
        skip(self, photos, session_override)
    )]
    pub fn resolve(
        &self,
        photos: &[Photo],
        property_code: &str,
        session_override: Option<&[Photo]>,
    ) -> (Vec<Photo>, OrderMode) {
        if let Some(session) = session_override {
            return (session.to_vec(), OrderMode::SessionOverride);
        }
        if is_manual_order(photos) {
            let ordered = photos.iter().cloned().sorted_by_key(|p| p.order).collect();
            return (ordered, OrderMode::PersistedManual);
        }
        (
            self.orderer.compute_order(photos, property_code),
            OrderMode::ComputedIntelligent,
        )
    }
}

/// Move the featured photo to the front for display only.
///
/// `order` values are left untouched, so nothing done here can leak back
/// into storage.
pub fn pin_featured_for_display(photos: &[Photo]) -> Vec<Photo> {
    match photos.iter().position(|p| p.featured.is_featured()) {
        Some(index) if index > 0 => {
            let mut pinned = photos.to_vec();
            let featured = pinned.remove(index);
            pinned.insert(0, featured);
            pinned
        }
        _ => photos.to_vec(),
    }
}
