use axon_client::{Client, ClientConfig, Transport};
use axon_test::{
    init_logger, registry, spawned_ids,
    test_protocol::{Emote, Position, Transform, PLAYER},
    LocalTransport, TestServer,
};

#[test]
fn update_applies_every_pending_buffer() {
    init_logger();
    let mut client = Client::new(ClientConfig::default(), registry());
    let (mut transport, server_end) = LocalTransport::pair();
    let mut server = TestServer::new();
    client.connect();

    server_end.send(server.spawn(1, PLAYER).build());
    server_end.send(server.spawn(2, PLAYER).change(2, &Position::new(0.0, 1.0, 0.0)).build());

    let events = client.update(&mut transport);

    assert_eq!(spawned_ids(&events), vec![1, 2]);
    assert_eq!(events.len(), 3);
    assert_eq!(server_end.pending_for_client(), 0);
    assert_eq!(
        client
            .engine()
            .entity(2)
            .unwrap()
            .component::<Transform>()
            .unwrap()
            .position,
        Position::new(0.0, 1.0, 0.0)
    );

    assert!(client.update(&mut transport).is_empty());
}

#[test]
fn update_flushes_before_receiving() {
    init_logger();
    let mut client = Client::new(ClientConfig::default(), registry());
    let (mut transport, server_end) = LocalTransport::pair();
    client.connect();

    client
        .invoke(&Emote {
            name: "wave".to_owned(),
            target: Some(1),
        })
        .unwrap();
    client.update(&mut transport);

    assert_eq!(server_end.received_count(), 1);
    assert!(client.engine().outbound().is_empty());
}

#[test]
fn disconnected_transport_keeps_outbound() {
    init_logger();
    let mut client = Client::new(ClientConfig::default(), registry());
    let (mut transport, server_end) = LocalTransport::pair();
    client.connect();
    server_end.set_connected(false);

    client
        .invoke(&Emote {
            name: "wave".to_owned(),
            target: None,
        })
        .unwrap();
    client.update(&mut transport);

    assert_eq!(server_end.received_count(), 0);
    assert_eq!(client.engine().outbound_frame_count(), 1);
}

#[test]
fn failed_send_keeps_outbound_until_it_succeeds() {
    init_logger();
    let mut client = Client::new(ClientConfig::default(), registry());
    let (mut transport, server_end) = LocalTransport::pair();
    client.connect();
    server_end.fail_sends(true);

    client
        .invoke(&Emote {
            name: "bow".to_owned(),
            target: None,
        })
        .unwrap();
    client.update(&mut transport);

    assert_eq!(server_end.received_count(), 0);
    assert_eq!(client.engine().outbound_frame_count(), 1);
    assert!(transport
        .last_error()
        .map_or(false, |detail| detail.contains("injected failure")));

    server_end.fail_sends(false);
    client.update(&mut transport);
    assert_eq!(server_end.received_count(), 1);
    assert!(client.engine().outbound().is_empty());
}

#[test]
fn connect_and_disconnect_reset_the_live_set() {
    init_logger();
    let mut client = Client::new(ClientConfig::default(), registry());
    let (mut transport, server_end) = LocalTransport::pair();
    let mut server = TestServer::new();

    client.connect();
    assert!(client.is_connected());
    server_end.send(server.spawn(1, PLAYER).spawn(2, PLAYER).build());
    client.update(&mut transport);
    assert_eq!(client.engine().entity_count(), 2);

    client.disconnect();
    assert!(!client.is_connected());
    assert_eq!(client.engine().entity_count(), 0);

    client.connect();
    server_end.send(server.spawn(1, PLAYER).build());
    client.update(&mut transport);
    assert_eq!(client.engine().entity_count(), 1);
}

#[test]
fn registry_is_locked_by_the_client() {
    let client = Client::new(ClientConfig::default(), registry());
    assert!(client.engine().registry().is_locked());
}
