pub mod remote;
pub mod service;

pub use remote::RemoteBackend;
pub use service::{Backend, BackendFuture};
