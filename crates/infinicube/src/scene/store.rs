//! # Cube Store
//!
//! Single source of truth for which cubes exist and which one is selected.
//! Every mutation goes through `&mut self`, so one owner drives the store at a
//! time; wrap it with [`CubeStore::into_shared`] when several logical callers
//! need it. Observers are told about every change through the [`EventSystem`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::cube::{Cube, CubeId, CubeOptions, CubeSize, CubeUpdate};
use crate::events::{EventSystem, EventType, EventHandler, HandlerId, StoreEvent};
use crate::foundation::color::Color;
use crate::foundation::math::{finite_or, Vec3};

/// Length of the random part of generated ids
const ID_SUFFIX_LEN: usize = 7;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Store-wide defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreConfig {
    /// Color used when a supplied color is malformed
    pub fallback_color: Color,
    /// Size used when none is supplied or the supplied one is invalid
    pub default_size: f32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fallback_color: Color::FALLBACK,
            default_size: 1.0,
        }
    }
}

/// Store shared between several logical callers
pub type SharedCubeStore = Arc<Mutex<CubeStore>>;

/// Lock a shared store, recovering from a poisoned mutex
///
/// Store operations never leave the collection half-updated, so the data
/// behind a poisoned lock is still consistent.
pub fn lock_shared(store: &SharedCubeStore) -> MutexGuard<'_, CubeStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ordered cube collection with a single selection
pub struct CubeStore {
    cubes: Vec<Cube>,
    selected: Option<CubeId>,
    events: EventSystem,
    config: StoreConfig,
    sequence: u64,
    rng: StdRng,
}

impl CubeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with custom defaults
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            cubes: Vec::new(),
            selected: None,
            events: EventSystem::new(),
            config: Self::sanitize_config(config),
            sequence: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an empty store whose ids and colors come from a seeded generator
    pub fn with_seed(config: StoreConfig, seed: u64) -> Self {
        let mut store = Self::with_config(config);
        store.rng = StdRng::seed_from_u64(seed);
        store
    }

    /// Create a store that already holds `initial` cubes
    ///
    /// No notifications fire for these. Cubes whose id is already taken are
    /// dropped with a warning.
    pub fn with_cubes(config: StoreConfig, initial: impl IntoIterator<Item = Cube>) -> Self {
        let mut store = Self::with_config(config);
        for mut cube in initial {
            if store.contains(&cube.id) {
                log::warn!("Dropping initial cube with duplicate id {}", cube.id);
                continue;
            }
            cube.size = store.sanitize_size(Some(cube.size));
            cube.position = finite_or(cube.position, Vec3::zeros());
            store.cubes.push(cube);
        }
        store
    }

    fn sanitize_config(mut config: StoreConfig) -> StoreConfig {
        if !(config.default_size.is_finite() && config.default_size > 0.0) {
            log::warn!("Invalid default cube size {}, using 1", config.default_size);
            config.default_size = 1.0;
        }
        config
    }

    /// Wrap the store for shared access
    pub fn into_shared(self) -> SharedCubeStore {
        Arc::new(Mutex::new(self))
    }

    /// Store-wide defaults
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Create a cube and return its id
    pub fn create(&mut self, position: Vec3, options: CubeOptions) -> CubeId {
        let id = self.next_id();
        let color = match options.color {
            Some(text) => self.parse_color(&text),
            None => Color::random(&mut self.rng),
        };
        let cube = Cube {
            id: id.clone(),
            position: finite_or(position, Vec3::zeros()),
            size: self.sanitize_size(options.size),
            color,
            theme: options.theme,
        };

        log::debug!("Created cube {} at {:?}", cube.id, cube.position.as_slice());
        self.cubes.push(cube.clone());
        self.events.emit(&StoreEvent::Created(cube));
        id
    }

    /// Select a cube; an unknown id clears the selection
    ///
    /// Fires a selection notification every time, even when nothing changed.
    pub fn select(&mut self, id: &CubeId) {
        let cube = self.get(id).cloned();
        match &cube {
            Some(_) => log::debug!("Selected cube {id}"),
            None => log::debug!("Cube {id} not found, selection cleared"),
        }
        self.selected = cube.as_ref().map(|c| c.id.clone());
        self.events.emit(&StoreEvent::SelectionChanged(cube));
    }

    /// Clear the selection
    pub fn deselect(&mut self) {
        self.selected = None;
        self.events.emit(&StoreEvent::SelectionChanged(None));
    }

    /// Delete a cube
    ///
    /// The deletion notification fires even for unknown ids, which leave the
    /// scene untouched. Returns whether a cube was removed.
    pub fn delete(&mut self, id: &CubeId) -> bool {
        let Some(index) = self.index_of(id) else {
            log::debug!("Delete of unknown cube {id}, nothing removed");
            self.events.emit(&StoreEvent::Deleted(id.clone()));
            return false;
        };
        let removed = self.cubes.remove(index);

        if self.selected.as_ref() == Some(&removed.id) {
            self.selected = None;
            self.events.emit(&StoreEvent::SelectionChanged(None));
        }
        log::debug!("Deleted cube {}", removed.id);
        self.events.emit(&StoreEvent::Deleted(removed.id));
        true
    }

    /// Remove every cube and clear the selection
    ///
    /// Fires a single selection notification and no per-cube deletions.
    pub fn clear(&mut self) {
        log::debug!("Clearing {} cubes", self.cubes.len());
        self.cubes.clear();
        self.selected = None;
        self.events.emit(&StoreEvent::SelectionChanged(None));
    }

    /// Apply a patch to an existing cube
    ///
    /// Returns whether the cube exists. An empty patch changes nothing and
    /// fires nothing.
    pub fn update(&mut self, id: &CubeId, update: CubeUpdate) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if update.is_empty() {
            return true;
        }

        let color = update.color.map(|text| self.parse_color(&text));
        let size = update.size.map(|size| self.sanitize_size(Some(size)));
        let cube = &mut self.cubes[index];
        if let Some(position) = update.position {
            cube.position = finite_or(position, cube.position);
        }
        if let Some(color) = color {
            cube.color = color;
        }
        if let Some(size) = size {
            cube.size = size;
        }
        if let Some(theme) = update.theme {
            cube.theme = theme;
        }

        let snapshot = cube.clone();
        log::debug!("Updated cube {}", snapshot.id);
        self.events.emit(&StoreEvent::Updated(snapshot));
        true
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Independent snapshot of all cubes in insertion order
    pub fn list(&self) -> Vec<Cube> {
        self.cubes.clone()
    }

    /// Borrowing iterator over the cubes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Cube> {
        self.cubes.iter()
    }

    /// Look up a cube
    pub fn get(&self, id: &CubeId) -> Option<&Cube> {
        self.cubes.iter().find(|cube| &cube.id == id)
    }

    /// Whether a cube exists
    pub fn contains(&self, id: &CubeId) -> bool {
        self.index_of(id).is_some()
    }

    /// The selected cube
    pub fn selected(&self) -> Option<&Cube> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Id of the selected cube
    pub fn selected_id(&self) -> Option<&CubeId> {
        self.selected.as_ref()
    }

    /// Whether `id` is the selected cube
    pub fn is_selected(&self, id: &CubeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Number of cubes
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    /// Whether the store holds no cubes
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register a handler for one notification type
    pub fn subscribe(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) -> HandlerId {
        self.events.register_handler(event_type, handler)
    }

    /// Register a closure for one notification type
    pub fn observe<F>(&mut self, event_type: EventType, f: F) -> HandlerId
    where
        F: FnMut(&StoreEvent) + Send + 'static,
    {
        self.events.observe(event_type, f)
    }

    /// Remove a handler
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        self.events.unregister(id)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn index_of(&self, id: &CubeId) -> Option<usize> {
        self.cubes.iter().position(|cube| &cube.id == id)
    }

    /// Generate an id that is not in use
    ///
    /// The sequence number alone makes ids from this store unique; the
    /// random suffix keeps them opaque. Initial cubes may carry any id, so
    /// the collection is still checked.
    fn next_id(&mut self) -> CubeId {
        loop {
            self.sequence += 1;
            let suffix: String = (0..ID_SUFFIX_LEN)
                .map(|_| char::from(ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())]))
                .collect();
            let id = CubeId::new(format!("cube-{}-{suffix}", self.sequence));
            if !self.contains(&id) {
                return id;
            }
            log::warn!("Generated id {id} collides with an existing cube, retrying");
        }
    }

    fn parse_color(&self, text: &str) -> Color {
        Color::parse(text).unwrap_or_else(|| {
            log::warn!("Invalid cube color {text:?}, using {}", self.config.fallback_color);
            self.config.fallback_color
        })
    }

    fn sanitize_size(&self, size: Option<CubeSize>) -> CubeSize {
        let default = self.config.default_size;
        match size {
            None => CubeSize::Uniform(default),
            Some(size) if size.is_valid() => size,
            Some(CubeSize::Uniform(s)) => {
                log::warn!("Invalid cube size {s}, using {default}");
                CubeSize::Uniform(default)
            }
            Some(CubeSize::PerAxis(axes)) => {
                log::warn!("Invalid cube size {axes:?}, replacing bad axes with {default}");
                CubeSize::PerAxis(axes.map(|s| if s.is_finite() && s > 0.0 { s } else { default }))
            }
        }
    }
}

impl Default for CubeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CubeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CubeStore")
            .field("cubes", &self.cubes)
            .field("selected", &self.selected)
            .field("events", &self.events)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
