use axon_client::{ClientConfig, EntityEvent, ReplicationEngine};
use axon_test::{
    change_counts, init_logger, registry, spawned_ids,
    test_protocol::{Position, Sprite, Tint, Transform, MONSTER, PLAYER},
    TestServer,
};

fn engine() -> ReplicationEngine {
    init_logger();
    ReplicationEngine::new(ClientConfig::default(), registry())
}

#[test]
fn duplicate_spawn_keeps_one_entity() {
    let mut engine = engine();
    let mut server = TestServer::new();

    let events = engine.receive(&server.spawn(5, PLAYER).spawn(5, PLAYER).build());

    assert_eq!(spawned_ids(&events), vec![5]);
    assert_eq!(engine.entity_count(), 1);
}

#[test]
fn duplicate_spawn_keeps_existing_state() {
    let mut engine = engine();
    let mut server = TestServer::new();

    engine.receive(
        &server
            .spawn(5, PLAYER)
            .change(5, &Position::new(1.0, 2.0, 3.0))
            .build(),
    );
    // a second spawn with another template must not rebuild the entity
    engine.receive(&server.spawn(5, MONSTER).build());

    let entity = engine.entity(5).unwrap();
    assert_eq!(entity.type_id(), PLAYER);
    assert_eq!(
        entity.component::<Transform>().unwrap().position,
        Position::new(1.0, 2.0, 3.0)
    );
}

#[test]
fn despawn_then_change_is_dropped() {
    let mut engine = engine();
    let mut server = TestServer::new();

    let events = engine.receive(
        &server
            .spawn(5, PLAYER)
            .despawn(5)
            .change(5, &Position::new(9.0, 9.0, 9.0))
            .build(),
    );

    assert_eq!(events.len(), 2);
    assert!(events[0].is_spawn());
    assert!(events[1].is_despawn());
    assert!(change_counts(&events).is_empty());
    assert!(!engine.has_entity(5));
    assert_eq!(engine.entity_count(), 0);
}

#[test]
fn despawn_hands_back_the_entity() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(8, PLAYER).change(8, &Tint(0xff00ff)).build());

    let events = engine.receive(&server.despawn(8).build());
    match &events[..] {
        [EntityEvent::Despawn { entity_id, entity }] => {
            assert_eq!(*entity_id, 8);
            assert_eq!(entity.component::<Sprite>().unwrap().tint, Tint(0xff00ff));
        }
        other => panic!("Expected a single despawn, got {other:?}"),
    }
}

#[test]
fn unknown_ids_are_no_ops() {
    let mut engine = engine();
    let mut server = TestServer::new();

    let events = engine.receive(
        &server
            .despawn(77)
            .change(77, &Position::default())
            .spawn(1, 4242)
            .build(),
    );

    assert!(events.is_empty());
    assert_eq!(engine.entity_count(), 0);
}

#[test]
fn change_of_unregistered_type_is_a_no_op() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(1, PLAYER).build());

    let payload = axon_shared::Value::F32(1.0).to_bytes().unwrap();
    let events = engine.receive(
        &server
            .raw(axon_shared::ActionKind::Change, 1, 31337, &payload)
            .build(),
    );

    assert!(events.is_empty());
    assert!(engine
        .entity(1)
        .unwrap()
        .component::<Transform>()
        .unwrap()
        .changes
        .is_empty());
}

#[test]
fn reset_clears_all_entities() {
    let mut engine = engine();
    let mut server = TestServer::new();
    for id in 0..10 {
        server.spawn(id, if id % 2 == 0 { PLAYER } else { MONSTER });
    }
    engine.receive(&server.build());
    assert_eq!(engine.entity_count(), 10);

    assert_eq!(engine.reset(), 10);
    assert_eq!(engine.entities().count(), 0);

    // ids are free again after a reset
    let events = engine.receive(&server.spawn(0, PLAYER).build());
    assert_eq!(spawned_ids(&events), vec![0]);
}
