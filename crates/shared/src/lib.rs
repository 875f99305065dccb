pub mod api;
pub mod types;

mod utils;
pub use utils::*;
