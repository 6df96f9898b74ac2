pub mod fallback;
pub mod response;

pub use fallback::{json_method_not_allowed, not_found};
pub use response::{ApiResponse, ApiResult};
