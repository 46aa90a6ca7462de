pub mod config;
pub mod container;
pub mod external_services;

// Re-export commonly used items
pub use config::IngestionConfig;
pub use container::AppContainer;
