// URL handling utilities
pub mod url_builder;
pub mod query_string;

pub use url_builder::absolute_url;
pub use query_string::build_query_string;
