pub mod connection;
pub mod enriched;
pub mod listings;
pub mod runs;

pub use connection::{init_db, Database};
