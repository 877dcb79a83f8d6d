use std::sync::Arc;

use anyhow::Context;

use crate::accounts::{
    capabilities::{UserGetter, UserLister, UserLoginer, UserRegisterer},
    password::Argon2Hasher,
    repo::AccountStore,
};
use crate::config::AppConfig;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub registerer: Arc<dyn UserRegisterer>,
    pub loginer: Arc<dyn UserLoginer>,
    pub getter: Arc<dyn UserGetter>,
    pub lister: Arc<dyn UserLister>,
}

impl AppState {
    /// Connects, migrates and wires the account store behind every capability.
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let pool = db::connect(&config).await?;
        db::migrate(&pool).await?;

        let hasher = Argon2Hasher::new(&config.hasher).context("argon2 parameters")?;
        let store = Arc::new(AccountStore::new(pool, Arc::new(hasher)));

        Ok(Self::from_store(store))
    }

    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRegisterer + UserLoginer + UserGetter + UserLister + 'static,
    {
        Self {
            registerer: store.clone(),
            loginer: store.clone(),
            getter: store.clone(),
            lister: store,
        }
    }
}
