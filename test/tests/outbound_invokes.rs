use axon_client::{Client, ClientConfig, EngineError, EntityEvent, ReplicationEngine};
use axon_shared::{ActionKind, FrameReader, Mapper, TagWriter, Value, Variant, FRAME_HEADER_SIZE};
use axon_test::{
    init_logger, registry,
    test_protocol::{Emote, Health, Sprite, PLAYER},
    LocalTransport, TestServer,
};

fn emote(name: &str) -> Emote {
    Emote {
        name: name.to_owned(),
        target: None,
    }
}

#[test]
fn invokes_are_batched_into_one_buffer() {
    init_logger();
    let mut engine = ReplicationEngine::new(ClientConfig::default(), registry());
    engine.invoke(&emote("wave")).unwrap();
    engine.invoke(&emote("bow")).unwrap();
    engine
        .invoke_value(
            Health::TYPE_ID,
            &Value::Object(vec![("current".to_owned(), Value::F32(3.0))]),
        )
        .unwrap();
    assert_eq!(engine.outbound_frame_count(), 3);

    let bytes = engine.take_outbound().unwrap();
    let frames: Vec<_> = FrameReader::new(&bytes).collect::<Result<_, _>>().unwrap();
    assert_eq!(frames.len(), 3);
    for frame in &frames {
        assert_eq!(frame.action, ActionKind::Invoke);
        assert_eq!(frame.entity_id, 0);
    }
    assert_eq!(frames[0].type_id, Emote::TYPE_ID);
    assert_eq!(Mapper::decode_as::<Emote>(frames[1].payload).unwrap(), emote("bow"));
    assert_eq!(
        Mapper::decode_as::<Health>(frames[2].payload).unwrap(),
        Health {
            current: 3.0,
            max: 0.0
        }
    );
    assert!(engine.take_outbound().is_none());
}

#[test]
fn failed_send_keeps_the_buffer() {
    init_logger();
    let mut client = Client::new(ClientConfig::default(), registry());
    let (mut transport, server) = LocalTransport::pair();
    client.connect();

    client.invoke(&emote("wave")).unwrap();
    server.fail_sends(true);
    client.update(&mut transport);
    assert_eq!(server.received_count(), 0);
    assert!(!client.engine().outbound().is_empty());

    server.fail_sends(false);
    client.invoke(&emote("bow")).unwrap();
    client.update(&mut transport);

    let sent = server.receive().unwrap();
    let frames: Vec<_> = FrameReader::new(&sent).collect::<Result<_, _>>().unwrap();
    assert_eq!(frames.len(), 2);
    assert!(client.engine().outbound().is_empty());
    assert!(server.receive().is_none());
}

#[test]
fn drain_into_reports_transport_errors() {
    init_logger();
    let mut engine = ReplicationEngine::new(ClientConfig::default(), registry());
    let (mut transport, server) = LocalTransport::pair();

    assert_eq!(engine.drain_into(&mut transport), Ok(0));

    engine.invoke(&emote("wave")).unwrap();
    server.set_connected(false);
    assert!(matches!(
        engine.drain_into(&mut transport),
        Err(EngineError::Transport(_))
    ));
    assert_eq!(engine.outbound_frame_count(), 1);

    server.set_connected(true);
    let pending = engine.outbound().len();
    assert_eq!(engine.drain_into(&mut transport), Ok(pending));
    assert_eq!(engine.outbound_frame_count(), 0);
}

#[test]
fn outbound_bound_drops_newest() {
    init_logger();
    let mut payload = TagWriter::new();
    Mapper::encode_as(&emote("wave"), &mut payload).unwrap();
    let one_frame = FRAME_HEADER_SIZE + payload.len();
    let config = ClientConfig {
        max_outbound_bytes: one_frame,
        ..ClientConfig::default()
    };
    let mut engine = ReplicationEngine::new(config, registry());

    engine.invoke(&emote("wave")).unwrap();
    assert!(matches!(
        engine.invoke(&emote("wave")),
        Err(EngineError::OutboundBufferFull { .. })
    ));
    assert_eq!(engine.outbound_frame_count(), 1);

    // sending frees the space again
    engine.take_outbound().unwrap();
    engine.invoke(&emote("wave")).unwrap();
}

#[test]
fn inbound_invoke_is_reported_and_forwarded() {
    init_logger();
    let mut engine = ReplicationEngine::new(ClientConfig::default(), registry());
    let mut server = TestServer::new();
    engine.receive(&server.spawn(9, PLAYER).build());

    let events = engine.receive(&server.invoke(9, &emote("cheer")).invoke(404, &emote("lost")).build());

    assert_eq!(events.len(), 2);
    match &events[0] {
        EntityEvent::Invoke {
            entity_id,
            type_id,
            value,
        } => {
            assert_eq!(*entity_id, 9);
            assert_eq!(*type_id, Emote::TYPE_ID);
            assert_eq!(value.get("name"), Some(&Value::from("cheer")));
        }
        other => panic!("Expected an invoke event, got {other:?}"),
    }
    // invokes for entities that are not live are still reported
    assert_eq!(events[1].entity_id(), 404);

    let sprite = engine.entity(9).unwrap().component::<Sprite>().unwrap();
    assert_eq!(sprite.invokes.len(), 1);
    assert_eq!(sprite.invokes[0].0, Emote::TYPE_ID);
}
