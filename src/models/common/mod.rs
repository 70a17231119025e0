pub mod numeric;
pub mod response;

pub use numeric::{deserialize_optional_f64, deserialize_optional_i64};
pub use response::ApiResponse;
