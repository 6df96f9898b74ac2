pub mod create;
pub mod delete;
pub mod detail;
pub mod update;

// Re-export handler functions for use in routing
pub use create::create as drinks_create;
pub use delete::delete as drinks_delete;
pub use detail::detail as drinks_detail;
pub use update::update as drinks_update;
