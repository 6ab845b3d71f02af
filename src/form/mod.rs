//! Request form: draft state behind explicit change handlers, a closed method
//! selector, and the submission that hands the draft to the backend.

pub mod component;
pub mod draft;
pub mod method;

pub use component::{render_error, render_value, RequestForm};
pub use draft::{split_header_lines, FormInput, RequestDraft, RequestInvocation};
pub use method::{Method, UnknownMethod};
