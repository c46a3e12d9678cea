//! Plain data types managed by the actors, plus the request payloads that create them.

pub mod order;
pub mod page;
pub mod product;
pub mod status;

pub use order::*;
pub use page::*;
pub use product::*;
pub use status::*;
