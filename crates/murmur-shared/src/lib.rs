// Domain types shared by the store and the view-state engine.

pub mod alias;
pub mod constants;
pub mod message;
pub mod recipients;
pub mod types;

pub use alias::normalize_alias;
pub use message::Message;
pub use recipients::{same_recipients, RecipientSet};
pub use types::{AuthorId, Mode};
