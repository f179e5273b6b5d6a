//! The computed "intelligent" ordering: cover photo first, then the
//! remaining photos grouped by upload batch.

use std::cell::RefCell;
use std::num::NonZero;

use entity::Photo;
use lru::LruCache;

use super::signature;

/// Cached orderings keyed by property code.
///
/// Injectable so tests can isolate state per case. Entries only leave
/// through [`OrderCache::invalidate`] (or LRU pressure); there is no TTL, so
/// every mutation of a property's photo set must invalidate explicitly.
pub trait OrderCache {
    fn get(&self, property_code: &str) -> Option<Vec<Photo>>;
    fn set(&self, property_code: &str, photos: Vec<Photo>);
    fn invalidate(&self, property_code: &str);
}

/// Default cache: a bounded LRU map, one entry per property.
#[derive(Debug)]
pub struct LruOrderCache {
    entries: RefCell<LruCache<String, Vec<Photo>>>,
}

impl LruOrderCache {
    pub fn new(capacity: NonZero<usize>) -> Self {
        Self {
            entries: RefCell::new(LruCache::new(capacity)),
        }
    }
}

impl Default for LruOrderCache {
    fn default() -> Self {
        Self::new(64.try_into().unwrap())
    }
}

impl OrderCache for LruOrderCache {
    fn get(&self, property_code: &str) -> Option<Vec<Photo>> {
        self.entries.borrow_mut().get(property_code).cloned()
    }

    fn set(&self, property_code: &str, photos: Vec<Photo>) {
        self.entries.borrow_mut().put(property_code.to_owned(), photos);
    }

    fn invalidate(&self, property_code: &str) {
        self.entries.borrow_mut().pop(property_code);
    }
}

#[derive(Debug, Default)]
pub struct IntelligentOrderer<C = LruOrderCache> {
    cache: C,
}

impl IntelligentOrderer<LruOrderCache> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: OrderCache> IntelligentOrderer<C> {
    pub fn with_cache(cache: C) -> Self {
        Self { cache }
    }

    /// Drop the cached ordering for a property. Required after any add,
    /// remove, feature toggle or manual reorder of its photos.
    pub fn invalidate(&self, property_code: &str) {
        self.cache.invalidate(property_code);
    }

    /// Order a collection: featured photo first, the rest grouped by batch
    /// signature. The first photo bearing a new signature fixes that group's
    /// rank and photos within a group keep their input order.
    ///
    /// Never fails and never mutates its input; the worst a malformed url
    /// can do is land its photo in the empty-signature group.
    #[tracing::instrument(
        name = "Computing intelligent photo order",
        level = "debug",
        skip(self, photos)
    )]
    pub fn compute_order(&self, photos: &[Photo], property_code: &str) -> Vec<Photo> {
        if let Some(cached) = self.cache.get(property_code) {
            tracing::debug!("Reusing cached ordering");
            return cached;
        }

        // Stale persisted order values must not bias the grouping.
        let mut working: Vec<Photo> = photos.to_vec();
        for photo in &mut working {
            photo.order = None;
        }

        let featured = match working.iter().position(|p| p.featured.is_featured()) {
            Some(index) => Some(working.remove(index)),
            None => None,
        };

        let mut groups: Vec<(String, Vec<Photo>)> = Vec::new();
        for photo in working {
            let sig = signature(&photo.url);
            match groups.iter_mut().find(|(existing, _)| *existing == sig) {
                Some((_, group)) => group.push(photo),
                None => groups.push((sig, vec![photo])),
            }
        }
        tracing::debug!(
            groups = groups.len(),
            featured = featured.is_some(),
            "Grouped photos by batch signature"
        );

        let mut ordered: Vec<Photo> = featured
            .into_iter()
            .chain(groups.into_iter().flat_map(|(_, group)| group))
            .collect();
        for (index, photo) in ordered.iter_mut().enumerate() {
            photo.order = Some(index as u32);
        }

        self.cache.set(property_code, ordered.clone());
        ordered
    }
}

#[cfg(test)]
mod test {
    use entity::Featured;

    use super::*;

    fn photo(code: &str, url: &str) -> Photo {
        Photo::new(code, url)
    }

    fn codes(photos: &[Photo]) -> Vec<&str> {
        photos.iter().map(|p| p.code.as_str()).collect()
    }

    #[test]
    fn groups_rank_by_first_appearance() {
        let orderer = IntelligentOrderer::new();
        let photos = vec![
            photo("a", "https://cdn.example.com/planta_01.jpg"),
            photo("b", "https://cdn.example.com/vista_01.jpg"),
            photo("c", "https://cdn.example.com/planta_02.jpg"),
        ];
        let ordered = orderer.compute_order(&photos, "AP0001");
        assert_eq!(codes(&ordered), vec!["a", "c", "b"]);
    }

    #[test]
    fn featured_photo_is_pinned_first() {
        let orderer = IntelligentOrderer::new();
        let mut photos = vec![
            photo("a", "https://cdn.example.com/planta_01.jpg"),
            photo("b", "https://cdn.example.com/vista_01.jpg"),
            photo("c", "https://cdn.example.com/planta_02.jpg"),
        ];
        photos[1].featured = Featured::Sim;
        let ordered = orderer.compute_order(&photos, "AP0002");
        assert_eq!(codes(&ordered), vec!["b", "a", "c"]);
    }

    #[test]
    fn orders_are_contiguous_from_zero() {
        let orderer = IntelligentOrderer::new();
        let photos = vec![
            photo("a", "https://cdn.example.com/planta_01.jpg"),
            photo("b", "https://cdn.example.com/vista_01.jpg"),
        ];
        let ordered = orderer.compute_order(&photos, "AP0003");
        let orders: Vec<_> = ordered.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![Some(0), Some(1)]);
    }

    #[test]
    fn stale_persisted_orders_do_not_bias_grouping() {
        let orderer = IntelligentOrderer::new();
        let mut photos = vec![
            photo("a", "https://cdn.example.com/planta_01.jpg"),
            photo("b", "https://cdn.example.com/vista_01.jpg"),
            photo("c", "https://cdn.example.com/planta_02.jpg"),
        ];
        photos[0].order = Some(7);
        photos[2].order = Some(1);
        let ordered = orderer.compute_order(&photos, "AP0004");
        assert_eq!(codes(&ordered), vec!["a", "c", "b"]);
    }

    #[test]
    fn input_is_never_mutated() {
        let orderer = IntelligentOrderer::new();
        let photos = vec![
            photo("a", "https://cdn.example.com/vista_01.jpg"),
            photo("b", "https://cdn.example.com/planta_01.jpg"),
        ];
        let before = photos.clone();
        orderer.compute_order(&photos, "AP0005");
        assert_eq!(photos, before);
    }

    #[test]
    fn second_call_hits_the_cache() {
        let orderer = IntelligentOrderer::new();
        let photos = vec![
            photo("a", "https://cdn.example.com/planta_01.jpg"),
            photo("b", "https://cdn.example.com/vista_01.jpg"),
        ];
        let first = orderer.compute_order(&photos, "AP0006");

        // A different input under the same key still returns the cached
        // result until someone invalidates.
        let changed = vec![photo("z", "https://cdn.example.com/mapa_01.jpg")];
        let second = orderer.compute_order(&changed, "AP0006");
        assert_eq!(first, second);
    }

    #[test]
    fn invalidate_forces_a_recompute() {
        let orderer = IntelligentOrderer::new();
        let photos = vec![
            photo("a", "https://cdn.example.com/planta_01.jpg"),
            photo("b", "https://cdn.example.com/vista_01.jpg"),
        ];
        orderer.compute_order(&photos, "AP0007");

        let changed = vec![photo("z", "https://cdn.example.com/mapa_01.jpg")];
        orderer.invalidate("AP0007");
        let recomputed = orderer.compute_order(&changed, "AP0007");
        assert_eq!(codes(&recomputed), vec!["z"]);
    }

    #[test]
    fn cache_entries_are_isolated_per_property() {
        let orderer = IntelligentOrderer::new();
        let first = orderer.compute_order(
            &[photo("a", "https://cdn.example.com/planta_01.jpg")],
            "AP0008",
        );
        let second = orderer.compute_order(
            &[photo("b", "https://cdn.example.com/vista_01.jpg")],
            "AP0009",
        );
        assert_eq!(codes(&first), vec!["a"]);
        assert_eq!(codes(&second), vec!["b"]);
    }

    #[test]
    fn unparseable_urls_share_the_empty_signature_group() {
        let orderer = IntelligentOrderer::new();
        let photos = vec![
            photo("a", ""),
            photo("b", "https://cdn.example.com/vista_01.jpg"),
            photo("c", "12345.jpg"),
        ];
        let ordered = orderer.compute_order(&photos, "AP0010");
        // Both empty-signature photos stay together at the rank where the
        // first one appeared.
        assert_eq!(codes(&ordered), vec!["a", "c", "b"]);
    }
}
