pub mod api;
pub mod defaults;
pub mod model;

pub use api::{ConfigCenter, InMemoryConfigCenter};
pub use defaults::default_config;
pub use model::{AppConfig, LanguageFlags};

#[cfg(test)]
mod tests;
