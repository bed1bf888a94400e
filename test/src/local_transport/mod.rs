//! In-memory transport for end-to-end tests. Routes buffers between a
//! `Client` and a test-side `ServerEnd` without any network I/O.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use axon_client::{Transport, TransportError};
use log::{debug, warn};

#[derive(Default)]
struct Shared {
    to_client: VecDeque<Vec<u8>>,
    to_server: VecDeque<Vec<u8>>,
    connected: bool,
    failing: bool,
    last_error: Option<String>,
}

/// Client half, handed to `Client::update`.
pub struct LocalTransport {
    shared: Rc<RefCell<Shared>>,
}

/// Test half: queues inbound buffers and inspects what the client sent.
pub struct ServerEnd {
    shared: Rc<RefCell<Shared>>,
}

impl LocalTransport {
    /// A connected transport and its server end.
    pub fn pair() -> (LocalTransport, ServerEnd) {
        let shared = Rc::new(RefCell::new(Shared {
            connected: true,
            ..Shared::default()
        }));
        (
            LocalTransport {
                shared: shared.clone(),
            },
            ServerEnd { shared },
        )
    }
}

impl Transport for LocalTransport {
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let mut shared = self.shared.borrow_mut();
        if !shared.connected {
            debug!("LocalTransport: dropping {} byte(s) sent while disconnected", payload.len());
            shared.last_error = Some("send while disconnected".to_owned());
            return Err(TransportError::NotConnected);
        }
        if shared.failing {
            let message = format!("injected failure sending {} byte(s)", payload.len());
            warn!("LocalTransport: {}", message);
            shared.last_error = Some(message.clone());
            return Err(TransportError::SendFailed(message));
        }
        shared.to_server.push_back(payload.to_vec());
        Ok(())
    }

    fn receive(&mut self) -> Option<Vec<u8>> {
        self.shared.borrow_mut().to_client.pop_front()
    }

    fn is_connected(&self) -> bool {
        self.shared.borrow().connected
    }

    fn last_error(&self) -> Option<String> {
        self.shared.borrow().last_error.clone()
    }
}

impl ServerEnd {
    /// Queue a buffer for the client's next receive.
    pub fn send(&self, bytes: Vec<u8>) {
        self.shared.borrow_mut().to_client.push_back(bytes);
    }

    /// Next buffer the client sent.
    pub fn receive(&self) -> Option<Vec<u8>> {
        self.shared.borrow_mut().to_server.pop_front()
    }

    pub fn received_count(&self) -> usize {
        self.shared.borrow().to_server.len()
    }

    pub fn pending_for_client(&self) -> usize {
        self.shared.borrow().to_client.len()
    }

    pub fn set_connected(&self, connected: bool) {
        debug!("ServerEnd: connected = {}", connected);
        self.shared.borrow_mut().connected = connected;
    }

    /// Make every client send fail until turned off again.
    pub fn fail_sends(&self, failing: bool) {
        self.shared.borrow_mut().failing = failing;
    }
}
