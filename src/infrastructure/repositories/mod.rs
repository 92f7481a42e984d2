pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryMessageRepository;
pub use postgres::PostgresMessageRepository;
