/// The favorites list
///
/// An ordered, duplicate-free list of dog ids, persisted through the
/// injected storage port on every mutation so a restart reconstructs
/// the list exactly. A missing or unreadable stored record loads as an
/// empty list, never as an error.

use tracing::warn;

use super::storage::{StoragePort, FAVORITES_KEY};

pub struct FavoritesStore {
    ids: Vec<String>,
    port: Box<dyn StoragePort>,
}

impl FavoritesStore {
    /// Build the store, reading the persisted list through the port.
    pub fn load(port: Box<dyn StoragePort>) -> Self {
        let ids = port
            .get(FAVORITES_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();

        FavoritesStore { ids, port }
    }

    /// Membership flip: add `id` if absent, remove it if present.
    /// The list never holds duplicates.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|v| v == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_string());
        }
        self.persist();
    }

    /// Empty the list unconditionally.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|v| v == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.ids) {
            Ok(json) => json,
            Err(e) => {
                warn!("could not serialize favorites: {e}");
                return;
            }
        };
        if let Err(e) = self.port.set(FAVORITES_KEY, &json) {
            warn!("could not persist favorites: {e}");
        }
    }
}
