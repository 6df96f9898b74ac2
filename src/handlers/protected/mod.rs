// handlers/protected/mod.rs - Endpoints guarded by a bearer token
//
// Each handler calls `Authenticator::requires_auth` with its permission
// before touching the store.
pub mod drinks;

pub use drinks::*;
