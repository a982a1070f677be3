use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use crate::error::{PresetError, PresetResult};
use crate::persistence::{PersistenceResult, PresetStorage};
use crate::preset::{PosePreset, PoseState};
use crate::skeleton::SkeletonSnapshot;

/// In-memory collection of built-in and user pose presets, keyed by id.
///
/// Built-in presets come from the compiled-in default set and are never
/// changed or written back; their ids form the denylist applied by
/// [`PresetStore::persist`].
#[derive(Debug, Clone, Default)]
pub struct PresetStore {
    presets: BTreeMap<String, PosePreset>,
    builtin_ids: BTreeSet<String>,
}

impl PresetStore {
    /// Creates a store holding only the given built-in presets
    pub fn with_defaults(defaults: BTreeMap<String, PosePreset>) -> Self {
        let builtin_ids = defaults.keys().cloned().collect();
        Self {
            presets: defaults,
            builtin_ids,
        }
    }

    /// Builds the start-up store: built-ins merged with the user presets found
    /// in `storage`. Stored entries filed under a key other than their own id,
    /// or reusing a built-in id, are ignored.
    pub fn load(
        defaults: BTreeMap<String, PosePreset>,
        storage: &dyn PresetStorage,
    ) -> PersistenceResult<Self> {
        let mut store = Self::with_defaults(defaults);
        for (key, preset) in storage.load_user_presets()? {
            if key != preset.id {
                log::warn!("Ignoring stored preset {:?}: filed under key {:?}", preset.id, key);
                continue;
            }
            if store.is_builtin(&preset.id) {
                log::warn!("Ignoring stored preset {:?}: id collides with a built-in preset", preset.id);
                continue;
            }
            store.presets.insert(key, preset);
        }
        log::info!(
            "Preset store ready: {} built-in, {} user",
            store.builtin_ids.len(),
            store.presets.len() - store.builtin_ids.len()
        );
        Ok(store)
    }

    /// All presets, built-in and user. Order is unspecified; see [`crate::search::rank`].
    pub fn list(&self) -> Vec<&PosePreset> {
        self.presets.values().collect()
    }

    pub fn get(&self, id: &str) -> Option<&PosePreset> {
        self.presets.get(id)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn is_builtin(&self, id: &str) -> bool {
        self.builtin_ids.contains(id)
    }

    /// User presets only, as handed to the persistence collaborator
    pub fn user_presets(&self) -> BTreeMap<String, PosePreset> {
        self.presets
            .iter()
            .filter(|(id, _)| !self.is_builtin(id))
            .map(|(id, preset)| (id.clone(), preset.clone()))
            .collect()
    }

    /// Adds a new user preset built from `skeleton`.
    ///
    /// The preset gets a fresh id, `keywords` equal to its name and priority 0.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::InvalidName`] for an empty or whitespace-only
    /// name, leaving the store unchanged.
    pub fn create(&mut self, name: &str, skeleton: SkeletonSnapshot) -> PresetResult<PosePreset> {
        if name.trim().is_empty() {
            return Err(PresetError::InvalidName);
        }

        let id = self.fresh_id();
        let preset = PosePreset {
            id: id.clone(),
            name: name.to_owned(),
            keywords: name.to_owned(),
            state: PoseState { skeleton },
            priority: 0,
        };
        self.presets.insert(id, preset.clone());

        log::info!("Created pose preset {:?} ({})", preset.name, preset.id);
        Ok(preset)
    }

    /// Writes every user preset to `storage`.
    ///
    /// A failed write leaves the in-memory store untouched.
    pub fn persist(&self, storage: &dyn PresetStorage) -> PersistenceResult<()> {
        storage.save_user_presets(&self.user_presets())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.presets.contains_key(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn builtin(id: &str, name: &str) -> PosePreset {
        PosePreset {
            id: id.to_owned(),
            name: name.to_owned(),
            keywords: String::new(),
            state: PoseState::default(),
            priority: 1,
        }
    }

    fn create_test_store() -> PresetStore {
        let mut defaults = BTreeMap::new();
        defaults.insert("d1".to_owned(), builtin("d1", "Stand"));
        defaults.insert("d2".to_owned(), builtin("d2", "Kneel"));
        PresetStore::with_defaults(defaults)
    }

    #[test]
    fn test_create_rejects_blank_names() {
        let mut store = create_test_store();
        for name in ["", " ", "\t\n"] {
            assert!(matches!(
                store.create(name, SkeletonSnapshot::default()),
                Err(PresetError::InvalidName)
            ));
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_fills_defaults() {
        let mut store = create_test_store();
        let preset = store.create("Pose A", SkeletonSnapshot::default()).unwrap();

        assert_eq!(preset.name, "Pose A");
        assert_eq!(preset.keywords, "Pose A");
        assert_eq!(preset.priority, 0);
        assert!(!store.is_builtin(&preset.id));
        assert_eq!(store.get(&preset.id), Some(&preset));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_user_presets_excludes_builtins() {
        let mut store = create_test_store();
        let preset = store.create("Stand", SkeletonSnapshot::default()).unwrap();

        let user = store.user_presets();
        assert_eq!(user.len(), 1);
        assert!(user.contains_key(&preset.id));
    }

    #[test]
    fn test_load_ignores_stored_builtin_ids() {
        let mut stored = BTreeMap::new();
        stored.insert("d1".to_owned(), builtin("d1", "Hijacked"));
        stored.insert("u1".to_owned(), builtin("u1", "Mine"));
        let storage = MemoryStorage::with_presets(stored);

        let mut defaults = BTreeMap::new();
        defaults.insert("d1".to_owned(), builtin("d1", "Stand"));
        let store = PresetStore::load(defaults, &storage).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("d1").unwrap().name, "Stand");
        assert!(!store.is_builtin("u1"));
    }

    #[test]
    fn test_load_ignores_entries_filed_under_another_key() {
        let mut stored = BTreeMap::new();
        stored.insert("user-key".to_owned(), builtin("d1", "Stand copy"));
        stored.insert("u1".to_owned(), builtin("u2", "Misfiled"));
        let storage = MemoryStorage::with_presets(stored);

        let mut defaults = BTreeMap::new();
        defaults.insert("d1".to_owned(), builtin("d1", "Stand"));
        let mut store = PresetStore::load(defaults, &storage).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.list().iter().filter(|preset| preset.id == "d1").count(), 1);
        assert!(store.get("user-key").is_none());

        store.create("Pose B", SkeletonSnapshot::default()).unwrap();
        store.persist(&storage).unwrap();
        let saved = storage.contents();
        assert_eq!(saved.len(), 1);
        assert!(saved.iter().all(|(key, preset)| key == &preset.id && preset.id != "d1"));
    }
}
