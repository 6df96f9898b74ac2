// handlers/public/mod.rs - Endpoints that need no credentials
pub mod drinks;

pub use drinks::list as drinks_list;
