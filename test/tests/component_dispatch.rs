use std::collections::BTreeMap;

use axon_client::{ClientConfig, ReplicationEngine};
use axon_shared::{Descriptor, Shape, Value, Variant};
use axon_test::{
    change_counts, init_logger, registry,
    test_protocol::{
        Counter, Health, Hero, Nameplate, Position, Sprite, Tint, Transform, Vitals, BILLBOARD,
        LABEL, MONSTER, PLAYER,
    },
    TestServer,
};

fn engine() -> ReplicationEngine {
    init_logger();
    ReplicationEngine::new(ClientConfig::default(), registry())
}

#[test]
fn position_reaches_only_the_component_with_the_slot() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(5, PLAYER).build());

    let events = engine.receive(&server.change(5, &Position::new(1.5, -2.0, 3.25)).build());

    assert_eq!(change_counts(&events), vec![(5, Position::TYPE_ID, 1)]);
    let entity = engine.entity(5).unwrap();
    let transform = entity.component::<Transform>().unwrap();
    assert_eq!(transform.position, Position::new(1.5, -2.0, 3.25));
    assert_eq!(transform.changes, vec![1000]);

    let sprite = entity.component::<Sprite>().unwrap();
    assert_eq!(sprite.tint, Tint::default());
    assert!(sprite.changes.is_empty());
}

#[test]
fn position_from_a_dynamic_value() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(5, PLAYER).build());

    // z is omitted and decodes to zero
    let value = Value::Object(vec![
        ("x".to_owned(), Value::F32(7.0)),
        ("y".to_owned(), Value::F32(8.0)),
    ]);
    engine.receive(
        &server
            .change_value(5, Position::TYPE_ID, &value, &Position::variant_shape())
            .build(),
    );

    let transform = engine.entity(5).unwrap().component::<Transform>().unwrap();
    assert_eq!(transform.position, Position::new(7.0, 8.0, 0.0));
}

#[test]
fn hero_record_with_an_older_schema() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(2, MONSTER).build());

    let hero = Hero {
        name: "Hero".to_owned(),
        level: 10,
        health: 100.5,
    };
    engine.receive(&server.change(2, &hero).build());
    assert_eq!(
        engine.entity(2).unwrap().component::<Vitals>().unwrap().hero,
        hero
    );

    // a sender that also writes a field the client does not know about
    let newer = Shape::Record(
        Descriptor::new("Hero")
            .with_field("name", Shape::Str)
            .with_field("level", Shape::I32)
            .with_field("health", Shape::F32)
            .with_field("title", Shape::Str),
    );
    let value = Value::Object(vec![
        ("name".to_owned(), Value::from("Hero")),
        ("level".to_owned(), Value::I32(11)),
        ("health".to_owned(), Value::F32(90.0)),
        ("title".to_owned(), Value::from("the Brave")),
    ]);
    let events = engine.receive(&server.change_value(2, Hero::TYPE_ID, &value, &newer).build());

    assert_eq!(change_counts(&events), vec![(2, Hero::TYPE_ID, 1)]);
    let vitals = engine.entity(2).unwrap().component::<Vitals>().unwrap();
    assert_eq!(vitals.hero.level, 11);
    assert_eq!(vitals.hero.health, 90.0);
    assert_eq!(vitals.health, Health::default());
}

#[test]
fn change_is_all_or_nothing() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(3, BILLBOARD).build());

    // a string converts for the nameplate but not for the counter
    let events = engine.receive(
        &server
            .change_value(3, LABEL, &Value::from("shop"), &Shape::Any)
            .build(),
    );
    assert!(events.is_empty());
    let entity = engine.entity(3).unwrap();
    assert!(entity.component::<Nameplate>().unwrap().label.is_empty());
    assert_eq!(entity.component::<Nameplate>().unwrap().changes, 0);
    assert_eq!(entity.component::<Counter>().unwrap().changes, 0);

    // a number fails for the nameplate, so nothing is written either
    let events = engine.receive(
        &server
            .change_value(3, LABEL, &Value::U32(4), &Shape::Any)
            .build(),
    );
    assert!(events.is_empty());
    assert_eq!(engine.entity(3).unwrap().component::<Counter>().unwrap().count, 0);
}

#[test]
fn change_without_a_matching_slot_writes_nothing() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(3, BILLBOARD).build());

    let events = engine.receive(&server.change(3, &Position::new(1.0, 1.0, 1.0)).build());
    assert_eq!(change_counts(&events), vec![(3, Position::TYPE_ID, 0)]);
}

#[test]
fn slot_tables_are_scanned_once_per_component_type() {
    let mut engine = engine();
    let mut server = TestServer::new();
    for id in 0..100 {
        server.spawn(id, PLAYER);
    }
    for id in 100..150 {
        server.spawn(id, MONSTER);
    }
    engine.receive(&server.build());

    assert_eq!(engine.entity_count(), 150);
    // Transform, Sprite and Vitals
    assert_eq!(engine.registry().slot_cache().scan_count(), 3);
}

#[test]
fn component_mut_gives_presentation_access() {
    let mut engine = engine();
    let mut server = TestServer::new();
    engine.receive(&server.spawn(1, PLAYER).build());

    let entity = engine.entity_mut(1).unwrap();
    entity.component_mut::<Transform>().unwrap().changes.clear();
    assert!(entity.has_component::<Sprite>());
    assert!(!entity.has_component::<Vitals>());
    assert!(entity.has_slot(Position::TYPE_ID));
    assert!(!entity.has_slot(Health::TYPE_ID));
    assert_eq!(entity.component_count(), 2);
}

#[test]
fn many_changes_in_one_buffer_apply_in_order() {
    let mut engine = engine();
    let mut server = TestServer::new();
    server.spawn(1, PLAYER);
    let mut expected = BTreeMap::new();
    for step in 0..20 {
        let position = Position::new(step as f32, 0.0, 0.0);
        server.change(1, &position);
        expected.insert(step, position);
    }

    let events = engine.receive(&server.build());

    assert_eq!(change_counts(&events).len(), 20);
    let transform = engine.entity(1).unwrap().component::<Transform>().unwrap();
    assert_eq!(transform.position, expected[&19]);
    assert_eq!(transform.changes.len(), 20);
}
