pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;

pub use config::{AppConfig, BoardConfig, DragConfig};
pub use error::TaskflowError;
pub use logging::{LogEntry, Loggable};
pub use result::TaskflowResult;
pub use traits::Repository;

#[cfg(any(test, feature = "mocks"))]
pub use traits::MockRepository;
