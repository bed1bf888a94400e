use axon_client::{ClientConfig, ReplicationEngine};
use axon_shared::{ActionKind, FRAME_HEADER_SIZE};
use axon_test::{
    init_logger, registry, spawned_ids,
    test_protocol::{Position, Transform, PLAYER},
    TestServer,
};

fn engine() -> ReplicationEngine {
    init_logger();
    ReplicationEngine::new(ClientConfig::default(), registry())
}

#[test]
fn valid_frame_then_garbage() {
    let mut engine = engine();
    let mut bytes = TestServer::new().spawn(5, PLAYER).build();
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe]);

    let events = engine.receive(&bytes);

    assert_eq!(spawned_ids(&events), vec![5]);
    assert!(engine.has_entity(5));
}

#[test]
fn frames_after_a_bad_frame_are_discarded() {
    let mut engine = engine();
    let mut server = TestServer::new();
    let mut bytes = server.spawn(1, PLAYER).build();
    // unknown action kind
    bytes.extend_from_slice(&[9u8; FRAME_HEADER_SIZE]);
    bytes.extend(server.spawn(2, PLAYER).build());

    let events = engine.receive(&bytes);

    assert_eq!(spawned_ids(&events), vec![1]);
    assert!(!engine.has_entity(2));

    // the next buffer is processed normally
    let events = engine.receive(&server.spawn(2, PLAYER).build());
    assert_eq!(spawned_ids(&events), vec![2]);
}

#[test]
fn truncated_payload() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(1, PLAYER).build());

    let bytes = server.change(1, &Position::new(4.0, 5.0, 6.0)).build();
    for cut in 0..bytes.len() {
        let events = engine.receive(&bytes[..cut]);
        assert!(events.is_empty(), "cut {cut} produced events");
    }

    let transform = engine.entity(1).unwrap().component::<Transform>().unwrap();
    assert_eq!(transform.position, Position::default());
    assert!(transform.changes.is_empty());
}

#[test]
fn payload_length_past_the_buffer() {
    let mut engine = engine();
    let mut server = TestServer::new();
    let mut bytes = server.spawn(1, PLAYER).build();
    bytes.push(ActionKind::Change.to_u8());
    bytes.extend_from_slice(&1u64.to_le_bytes());
    bytes.extend_from_slice(&1000u32.to_le_bytes());
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(&[0, 1, 2]);

    let events = engine.receive(&bytes);
    assert_eq!(events.len(), 1);
    assert!(engine.has_entity(1));
}

#[test]
fn empty_buffer() {
    let mut engine = engine();
    assert!(engine.receive(&[]).is_empty());
}
