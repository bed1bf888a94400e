mod outbound_buffer;
mod replication_engine;

pub use outbound_buffer::OutboundBuffer;
pub use replication_engine::ReplicationEngine;
