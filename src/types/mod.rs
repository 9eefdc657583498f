//! Type definitions for the Genderize API.

pub mod query;
pub mod status;

pub use query::{Gender, GenderRecord, Names, QueryResult};
pub use status::ResponseStatus;
