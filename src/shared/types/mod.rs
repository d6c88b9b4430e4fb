pub mod document;
pub mod errors;
pub mod pagination;
pub mod query;

pub use document::*;
pub use errors::*;
pub use pagination::*;
pub use query::*;
