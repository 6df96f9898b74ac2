use std::sync::Arc;

use crate::auth::Authenticator;
use crate::database::DrinkStore;

/// Everything a handler needs, built once at startup and cloned per request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrinkStore>,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(store: Arc<dyn DrinkStore>, auth: Arc<Authenticator>) -> Self {
        Self { store, auth }
    }
}
