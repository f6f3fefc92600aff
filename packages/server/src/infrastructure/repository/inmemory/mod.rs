//! インメモリ実装

pub mod lobby;

pub use lobby::InMemoryLobbyRepository;
