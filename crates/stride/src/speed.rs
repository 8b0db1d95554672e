use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_OVERRIDE_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverrideId(u32);

impl OverrideId {
    /// Allocates an id no other caller in this process will receive.
    pub fn next() -> Self {
        Self(NEXT_OVERRIDE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OverrideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "override#{}", self.0)
    }
}

pub trait SpeedProvider {
    fn evaluate(&self) -> f32;
}

impl<F> SpeedProvider for F
where
    F: Fn() -> f32,
{
    fn evaluate(&self) -> f32 {
        self()
    }
}

/// Temporary replacements for the base movement speed. The most recently
/// inserted entry wins.
#[derive(Default)]
pub struct SpeedOverrideStack {
    entries: Vec<(OverrideId, Box<dyn SpeedProvider>)>,
}

impl SpeedOverrideStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false and leaves the stack untouched if `id` is already present.
    pub fn insert(&mut self, id: OverrideId, provider: impl SpeedProvider + 'static) -> bool {
        if self.contains(id) {
            return false;
        }
        self.entries.push((id, Box::new(provider)));
        log::debug!("speed {} pushed, depth {}", id, self.entries.len());
        true
    }

    /// Returns false if `id` was not present.
    pub fn remove(&mut self, id: OverrideId) -> bool {
        let Some(index) = self.entries.iter().position(|(entry, _)| *entry == id) else {
            return false;
        };
        self.entries.remove(index);
        log::debug!("speed {} removed, depth {}", id, self.entries.len());
        true
    }

    pub fn contains(&self, id: OverrideId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    pub fn top(&self) -> Option<OverrideId> {
        self.entries.last().map(|(id, _)| *id)
    }

    pub fn resolve(&self, base_speed: f32) -> f32 {
        self.entries
            .last()
            .map(|(_, provider)| provider.evaluate())
            .unwrap_or(base_speed)
    }

    pub fn ids(&self) -> impl Iterator<Item = OverrideId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SpeedOverrideStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_resolves_to_base() {
        let stack = SpeedOverrideStack::new();
        assert_eq!(stack.resolve(5.0), 5.0);
        assert!(stack.top().is_none());
    }

    #[test]
    fn last_inserted_wins() {
        let mut stack = SpeedOverrideStack::new();
        let slow = OverrideId::next();
        let fast = OverrideId::next();

        stack.insert(slow, || 2.0_f32);
        stack.insert(fast, || 9.0_f32);
        assert_eq!(stack.resolve(5.0), 9.0);

        stack.remove(fast);
        assert_eq!(stack.resolve(5.0), 2.0);
        assert_eq!(stack.top(), Some(slow));
    }

    #[test]
    fn insert_and_remove_are_idempotent() {
        let mut stack = SpeedOverrideStack::new();
        let id = OverrideId::next();

        assert!(stack.insert(id, || 2.0_f32));
        assert!(!stack.insert(id, || 3.0_f32));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.resolve(5.0), 2.0);

        assert!(stack.remove(id));
        assert!(!stack.remove(id));
        assert!(stack.is_empty());
    }

    #[test]
    fn removing_buried_entry_keeps_top() {
        let mut stack = SpeedOverrideStack::new();
        let a = OverrideId::next();
        let b = OverrideId::next();
        let c = OverrideId::next();
        stack.insert(a, || 1.0_f32);
        stack.insert(b, || 2.0_f32);
        stack.insert(c, || 3.0_f32);

        stack.remove(b);
        assert_eq!(stack.ids().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(stack.resolve(0.0), 3.0);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(OverrideId::next(), OverrideId::next());
    }
}
