//! Ordered entity pools with retire-then-compact semantics

use serde::{Deserialize, Serialize};

use super::geom::Body;

/// Anything stored in a pool
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn id(&self) -> u32 {
        self.body().id
    }

    fn is_retired(&self) -> bool {
        self.body().retired
    }

    fn retire(&mut self) {
        self.body_mut().retire();
    }
}

/// Ordered collection of same-category entities (spawn order, unique ids)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Most recently spawned member
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate live (not yet retired) members mutably
    pub fn live_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().filter(|e| !e.is_retired())
    }

    pub fn has_retired(&self) -> bool {
        self.items.iter().any(Entity::is_retired)
    }

    /// Drop every retired member, keeping order. Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|e| !e.is_retired());
        before - self.items.len()
    }
}

impl<'a, T: Entity> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Debug, Clone)]
    struct Dummy(Body);

    impl Entity for Dummy {
        fn body(&self) -> &Body {
            &self.0
        }
        fn body_mut(&mut self) -> &mut Body {
            &mut self.0
        }
    }

    fn dummy(id: u32) -> Dummy {
        Dummy(Body::new(id, Vec2::ZERO, Vec2::ONE))
    }

    #[test]
    fn test_compact_keeps_order() {
        let mut pool = Pool::new();
        for id in 1..=5 {
            pool.push(dummy(id));
        }
        for e in pool.iter_mut().filter(|e| e.id() % 2 == 0) {
            e.retire();
        }
        assert!(pool.has_retired());

        assert_eq!(pool.compact(), 2);
        assert!(!pool.has_retired());
        let ids: Vec<u32> = pool.iter().map(Entity::id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_live_mut_skips_retired() {
        let mut pool = Pool::new();
        pool.push(dummy(1));
        pool.push(dummy(2));
        pool.iter_mut().next().unwrap().retire();
        let live: Vec<u32> = pool.live_mut().map(|e| e.id()).collect();
        assert_eq!(live, vec![2]);
    }

    #[test]
    fn test_last_is_newest() {
        let mut pool = Pool::new();
        assert!(pool.last().is_none());
        pool.push(dummy(7));
        pool.push(dummy(9));
        assert_eq!(pool.last().map(Entity::id), Some(9));
    }
}
