mod uuid;
pub use self::uuid::*;

mod date;
pub use self::date::*;
