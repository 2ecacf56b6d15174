//! Cache de vistas de listado
//!
//! Cache en proceso con claves nombradas que corresponden a las rutas de
//! colección. Cada mutación invalida sincrónicamente las claves afectadas;
//! no hay expiración por tiempo, solo invalidate-on-write.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Claves de cache por colección
pub mod keys {
    pub const VEHICLES: &str = "vehicles";
    pub const MAINTENANCE_TYPES: &str = "maintenance-types";
    pub const SPARE_PARTS: &str = "spare-parts";
    pub const MAINTENANCES: &str = "maintenances";
    pub const DASHBOARD: &str = "dashboard";
}

#[derive(Debug, Clone)]
struct CachedView {
    value: Value,
    cached_at: DateTime<Utc>,
}

/// Cache compartido de respuestas de listado ya serializadas
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    entries: Arc<RwLock<HashMap<&'static str, CachedView>>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &'static str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries.get(key).map(|cached| {
            debug!("cache hit: {} (cached_at={})", key, cached.cached_at);
            cached.value.clone()
        })
    }

    pub async fn put(&self, key: &'static str, value: Value) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CachedView {
                value,
                cached_at: Utc::now(),
            },
        );
    }

    /// Invalidar un conjunto de claves después de una mutación
    pub async fn invalidate(&self, invalidated: &[&'static str]) {
        let mut entries = self.entries.write().await;
        for key in invalidated {
            if entries.remove(key).is_some() {
                debug!("cache invalidated: {}", key);
            }
        }
    }

    #[cfg(test)]
    async fn contains(&self, key: &'static str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_miss_then_hit() {
        let cache = ViewCache::new();
        assert!(cache.get(keys::VEHICLES).await.is_none());

        cache.put(keys::VEHICLES, json!({"total": 3})).await;
        assert_eq!(cache.get(keys::VEHICLES).await, Some(json!({"total": 3})));
    }

    #[tokio::test]
    async fn test_invalidate_removes_only_named_keys() {
        let cache = ViewCache::new();
        cache.put(keys::VEHICLES, json!([])).await;
        cache.put(keys::MAINTENANCES, json!([])).await;
        cache.put(keys::DASHBOARD, json!({})).await;

        cache.invalidate(&[keys::VEHICLES, keys::DASHBOARD]).await;

        assert!(!cache.contains(keys::VEHICLES).await);
        assert!(!cache.contains(keys::DASHBOARD).await);
        assert!(cache.contains(keys::MAINTENANCES).await);
    }

    #[tokio::test]
    async fn test_invalidate_missing_key_is_noop() {
        let cache = ViewCache::new();
        cache.invalidate(&[keys::SPARE_PARTS]).await;
        assert!(cache.get(keys::SPARE_PARTS).await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = ViewCache::new();
        cache.put(keys::DASHBOARD, json!({"total_vehicles": 1})).await;
        cache.put(keys::DASHBOARD, json!({"total_vehicles": 2})).await;
        assert_eq!(
            cache.get(keys::DASHBOARD).await,
            Some(json!({"total_vehicles": 2}))
        );
    }
}
