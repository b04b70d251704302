pub mod config_service;
pub mod fs_persistence_gateway;
pub mod paths;
pub mod recent_documents_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::fs_persistence_gateway::FsPersistenceGateway;
pub use crate::paths::InkwellPaths;
pub use crate::recent_documents_repository::TomlRecentDocumentsRepository;
