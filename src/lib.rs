pub mod config;
pub mod engine;
pub mod error;
pub mod provider;
pub mod server;
pub mod transaction;

pub use error::QueryError;
pub use provider::DataProvider;
pub use transaction::SaleRecord;
