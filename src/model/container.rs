// src/model/container.rs

use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// The capability a worker needs from the collection it is driven by.
///
/// A producer reads from one (`take`), a consumer writes to one
/// (`append`); the same contract serves both roles, so the store is
/// implemented once and handed to workers as a trait object.
///
/// Every operation must be atomic with respect to concurrent callers,
/// and `take` on an out-of-range index must report "no item" instead of
/// failing: with several workers racing on a shrinking store that case
/// is benign and means "nothing to do".
pub trait ItemStore<T>: Send + Sync {
    /// Appends `item` at the end of the store.
    fn append(&self, item: T);

    /// Removes and returns the item at `index` (0 = oldest), or `None`
    /// when the index is out of range.
    fn take(&self, index: usize) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, lock-guarded sequence of items.
///
/// Serves as both the source a producer drains and the destination a
/// consumer fills. Its lock is private and never held across a wait on
/// the shared queue, so store and queue locks never nest.
pub struct Container<T> {
    name: String,
    items: Mutex<Vec<T>>,
}

impl<T> Container<T> {
    /// Creates an empty container labelled `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Mutex::new(Vec::new()),
        }
    }

    /// Creates a container pre-seeded with `items`.
    pub fn with_items(name: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            name: name.into(),
            items: Mutex::new(items),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock_items(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }

    // Inherent mirrors of the trait accessors, so plain reporting code
    // does not need `ItemStore` in scope.
    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    pub fn clear(&self) {
        self.lock_items().clear();
    }
}

impl<T: Clone> Container<T> {
    /// A copy of the current contents, for reporting.
    pub fn snapshot(&self) -> Vec<T> {
        self.lock_items().clone()
    }
}

impl<T: Send> ItemStore<T> for Container<T> {
    fn append(&self, item: T) {
        self.lock_items().push(item);
    }

    fn take(&self, index: usize) -> Option<T> {
        let mut items = self.lock_items();
        if index < items.len() {
            Some(items.remove(index))
        } else {
            None
        }
    }

    fn len(&self) -> usize {
        self.lock_items().len()
    }
}

impl<T> fmt::Display for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (items: {})", self.name, self.lock_items().len())
    }
}
