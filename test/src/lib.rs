pub mod helpers;
pub mod local_transport;
pub mod test_protocol;

pub use helpers::*;
pub use local_transport::{LocalTransport, ServerEnd};
pub use test_protocol::{registry, TestProtocol};
