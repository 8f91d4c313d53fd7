pub mod memory;
pub mod postgres;
pub mod test_helpers;

pub use memory::InMemoryEventDao;
pub use postgres::TestPostgresContainer;
pub use test_helpers::*;
