pub mod collation;
pub mod slug;
pub mod validate;

pub use validate::{PathParam, ValidatedJson, ValidatedQuery};
