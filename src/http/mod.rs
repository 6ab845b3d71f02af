//! The HTTP execution engine behind `perform_http_request`.

pub mod executor;
pub mod headers;
pub mod response_builder;
pub mod types;

pub use executor::execute_request;
pub use headers::{header_lines, parse_header_line, parse_header_lines};
pub use response_builder::{build_response, is_binary_content, version_to_string, ResponseParts};
pub use types::*;
