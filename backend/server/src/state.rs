use std::sync::Arc;

use tracing::{info, warn};

use super::{
    config::{Config, StoreKind},
    database::{MemoryStore, Store, StoreError, SupabaseStore},
};

pub struct State {
    pub config: Config,
    pub store: Arc<dyn Store>,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, StoreError> {
        let store: Arc<dyn Store> = match config.store {
            StoreKind::Supabase => Arc::new(SupabaseStore::new(&config.supabase_url, &config.supabase_key)?),
            StoreKind::Memory => {
                warn!("Using in-memory store, nothing will persist");
                Arc::new(MemoryStore::default())
            }
        };

        info!("Store: {}", store.name());

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
