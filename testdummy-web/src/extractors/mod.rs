pub mod query;

pub use query::LenientQuery;
