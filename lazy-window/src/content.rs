use crate::key::{ItemKey, KeyEntry, KeyMap};

#[derive(Clone, Debug)]
struct CachedContent<C> {
    index: usize,
    content: C,
    touched: bool,
}

/// Memoizes materialized (measured) item content for the current measurement environment.
///
/// `E` is the environment the content was measured under (e.g. constraints plus density). When
/// it changes, every entry is dropped: content measured under the old environment must not be
/// reused. Dropping an entry releases whatever host resources `C` owns.
///
/// Entries are keyed by item key and double-checked against the index they were materialized
/// for, so a reorder within the same environment never serves stale content.
///
/// Entries belong to the layout pass that requested them. [`Self::begin_pass`] releases every
/// entry the previous pass did not touch, so only the visible slice stays alive.
#[derive(Clone, Debug)]
pub struct MaterializedContentCache<E, K, C> {
    environment: Option<E>,
    entries: KeyMap<K, CachedContent<C>>,
    materializations: usize,
}

impl<E, K, C> Default for MaterializedContentCache<E, K, C> {
    fn default() -> Self {
        Self {
            environment: None,
            entries: KeyMap::default(),
            materializations: 0,
        }
    }
}

impl<E: PartialEq, K: ItemKey, C> MaterializedContentCache<E, K, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per layout pass, before any [`Self::get_or_materialize`].
    ///
    /// Returns `true` when the environment changed and the cache was cleared.
    /// Follow with [`Self::begin_pass`] to release content the last pass no longer used.
    pub fn invalidate_if_environment_changed(&mut self, environment: E) -> bool {
        if self.environment.as_ref() == Some(&environment) {
            return false;
        }
        vdebug!(
            entries = self.entries.len(),
            "MaterializedContentCache: environment changed, clearing"
        );
        self.clear();
        self.environment = Some(environment);
        true
    }

    /// Starts a layout pass: drops entries that were neither requested nor adopted since the
    /// previous call. Returns how many entries were released.
    pub fn begin_pass(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| core::mem::replace(&mut entry.touched, false));
        let released = before - self.entries.len();
        if released > 0 {
            vtrace!(released, "MaterializedContentCache: released entries outside the pass");
        }
        released
    }

    /// Returns the content for `index`, materializing it at most once per environment.
    pub fn get_or_materialize(
        &mut self,
        index: usize,
        key: K,
        materialize: impl FnOnce(usize, &K) -> C,
    ) -> &C {
        let entry = match self.entries.entry(key) {
            KeyEntry::Occupied(mut occupied) => {
                if occupied.get().index != index {
                    vtrace!(
                        cached = occupied.get().index,
                        index,
                        "MaterializedContentCache: key moved, rematerializing"
                    );
                    let content = materialize(index, occupied.key());
                    self.materializations += 1;
                    *occupied.get_mut() = CachedContent {
                        index,
                        content,
                        touched: true,
                    };
                }
                let entry = occupied.into_mut();
                entry.touched = true;
                entry
            }
            KeyEntry::Vacant(vacant) => {
                let content = materialize(index, vacant.key());
                self.materializations += 1;
                vacant.insert(CachedContent {
                    index,
                    content,
                    touched: true,
                })
            }
        };
        &entry.content
    }

    /// Stores content produced outside the layout pass (e.g. by prefetch).
    ///
    /// Existing content for `key` is replaced and released. Adopted content survives the next
    /// [`Self::begin_pass`].
    pub fn adopt(&mut self, index: usize, key: K, content: C) {
        let entry = CachedContent {
            index,
            content,
            touched: true,
        };
        self.entries.insert(key, entry);
    }

    /// Cached content for `key`, if it was materialized for `index`.
    pub fn get(&self, index: usize, key: &K) -> Option<&C> {
        self.entries
            .get(key)
            .filter(|entry| entry.index == index)
            .map(|entry| &entry.content)
    }

    pub fn contains(&self, index: usize, key: &K) -> bool {
        self.get(index, key).is_some()
    }

    /// Drops all entries, releasing their resources.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.materializations = 0;
    }

    pub fn environment(&self) -> Option<&E> {
        self.environment.as_ref()
    }

    /// Number of `materialize` calls since the last clear.
    pub fn materialization_count(&self) -> usize {
        self.materializations
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
