use std::collections::BTreeSet;

use axon_client::{ClientConfig, ReplicationEngine};
use axon_test::{
    registry,
    test_protocol::{Position, PLAYER},
    TestServer,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Spawn(u64),
    Despawn(u64),
    Change(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u64..8).prop_map(Action::Spawn),
        (0u64..8).prop_map(Action::Despawn),
        (0u64..8).prop_map(Action::Change),
    ]
}

proptest! {
    #[test]
    fn live_set_follows_spawns_and_despawns(actions in prop::collection::vec(action(), 0..64)) {
        let mut engine = ReplicationEngine::new(ClientConfig::default(), registry());
        let mut server = TestServer::new();
        let mut model = BTreeSet::new();

        for action in &actions {
            match *action {
                Action::Spawn(id) => {
                    server.spawn(id, PLAYER);
                    model.insert(id);
                }
                Action::Despawn(id) => {
                    server.despawn(id);
                    model.remove(&id);
                }
                Action::Change(id) => {
                    server.change(id, &Position::new(id as f32, 0.0, 0.0));
                }
            }
        }
        engine.receive(&server.build());

        let live: BTreeSet<u64> = engine.entities().map(|entity| entity.id()).collect();
        prop_assert_eq!(live, model);
    }

    #[test]
    fn any_prefix_of_a_valid_buffer_is_safe(cut in 0usize..200) {
        let mut engine = ReplicationEngine::new(ClientConfig::default(), registry());
        let mut server = TestServer::new();
        for id in 0..4 {
            server.spawn(id, PLAYER).change(id, &Position::new(1.0, 2.0, 3.0));
        }
        let bytes = server.build();
        let cut = cut.min(bytes.len());

        let events = engine.receive(&bytes[..cut]);
        prop_assert!(events.len() <= 8);
        prop_assert!(engine.entity_count() <= 4);
    }
}
