pub mod errors;
pub mod id;
pub mod message;

pub use errors::{ConfigError, MetapromptError, StorageError};
pub use id::{new_id, MessageId, SessionId};
pub use message::{Message, Role};
