pub mod client;
pub mod error;
pub mod transport;

pub use client::{MandrillClient, SearchWindow};
pub use error::{ApiError, RemoteError};
pub use transport::{Endpoint, HttpTransport, Reply, Transport};
