use crate::core::models::{BaseEntity, EntityId};

struct Filters<'a, T: BaseEntity> {
    preds: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
}

impl<'a, T: BaseEntity> Filters<'a, T> {
    fn new() -> Self {
        Self { preds: Vec::new() }
    }

    fn admits(&self, entity: &T) -> bool {
        self.preds.iter().all(|f| f(entity))
    }
}

/// Insertion-ordered collection with a persisted id counter.
///
/// Ids are handed out from `next_id`, never from the collection length, so
/// they stay unique if entries are ever removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Repository<T: BaseEntity> {
    items: Vec<T>,
    next_id: EntityId,
}

impl<T: BaseEntity> Default for Repository<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: BaseEntity> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parts. A stale or missing counter is raised past
    /// the largest stored id; `None` when that would overflow `EntityId`.
    pub fn restore(items: Vec<T>, next_id: EntityId) -> Option<Self> {
        let floor = match items.iter().map(|e| e.id()).max() {
            Some(max) => max.checked_add(1)?,
            None => 1,
        };
        Some(Self {
            items,
            next_id: next_id.max(floor),
        })
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_parts(self) -> (Vec<T>, EntityId) {
        (self.items, self.next_id)
    }

    pub fn peek_next_id(&self) -> EntityId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Assigns the next id. `None` once the counter has no id left to hand out.
    pub fn insert(&mut self, mut entity: T) -> Option<&T> {
        let id = self.next_id;
        self.next_id = id.checked_add(1)?;
        entity.set_id(id);
        self.items.push(entity);
        self.items.last()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|e| e.id() == id)
    }

    pub fn query(&self) -> Query<'_, T> {
        Query::new(&self.items)
    }
}

pub struct Query<'a, T: BaseEntity> {
    items: &'a [T],
    filters: Filters<'a, T>,
}

impl<'a, T: BaseEntity> Query<'a, T> {
    fn new(items: &'a [T]) -> Self {
        Self {
            items,
            filters: Filters::new(),
        }
    }

    pub fn r#where(mut self, pred: impl Fn(&T) -> bool + 'a) -> Self {
        self.filters.preds.push(Box::new(pred));
        self
    }

    /// Matching entities in insertion order.
    pub fn collect(self) -> Vec<&'a T> {
        self.items.iter().filter(|e| self.filters.admits(e)).collect()
    }

    pub fn count(self) -> usize {
        self.items.iter().filter(|e| self.filters.admits(e)).count()
    }
}
