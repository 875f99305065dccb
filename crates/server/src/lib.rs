pub mod cli;
pub mod db;

mod payload;
pub use payload::*;

mod state;
pub use state::*;

pub mod routes;
