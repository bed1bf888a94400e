pub mod assertions;
pub mod test_server;

pub use assertions::{change_counts, init_logger, spawned_ids};
pub use test_server::TestServer;
