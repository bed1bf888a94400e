use axon_shared::{ActionKind, Frame, FrameWriter, Mapper, Shape, TagWriter, Value, Variant};
use log::{debug, trace};

/// Builds inbound buffers the way a server would write them.
///
/// Encoding helpers panic on values that do not fit their shape, so a bad
/// fixture fails loudly in the test that built it.
#[derive(Default)]
pub struct TestServer {
    writer: FrameWriter,
}

impl TestServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity_id: u64, template_id: u32) -> &mut Self {
        self.raw(ActionKind::Spawn, entity_id, template_id, &[])
    }

    pub fn despawn(&mut self, entity_id: u64) -> &mut Self {
        self.raw(ActionKind::Despawn, entity_id, 0, &[])
    }

    pub fn change<V: Variant>(&mut self, entity_id: u64, value: &V) -> &mut Self {
        let payload = encode_variant(value);
        self.raw(ActionKind::Change, entity_id, V::TYPE_ID, &payload)
    }

    pub fn change_value(&mut self, entity_id: u64, type_id: u32, value: &Value, shape: &Shape) -> &mut Self {
        let payload = Mapper::encode_to_vec(value, shape)
            .unwrap_or_else(|err| panic!("change fixture does not encode: {err}"));
        self.raw(ActionKind::Change, entity_id, type_id, &payload)
    }

    pub fn invoke<V: Variant>(&mut self, entity_id: u64, value: &V) -> &mut Self {
        let payload = encode_variant(value);
        self.raw(ActionKind::Invoke, entity_id, V::TYPE_ID, &payload)
    }

    pub fn raw(&mut self, action: ActionKind, entity_id: u64, type_id: u32, payload: &[u8]) -> &mut Self {
        trace!(
            "TestServer: {} entity {} type {} ({} byte payload)",
            action,
            entity_id,
            type_id,
            payload.len()
        );
        self.writer
            .write(&Frame::new(action, entity_id, type_id, payload))
            .unwrap_or_else(|err| panic!("frame fixture does not encode: {err}"));
        self
    }

    /// Take the frames written so far as one buffer.
    pub fn build(&mut self) -> Vec<u8> {
        let bytes = self.writer.as_slice().to_vec();
        self.writer.clear();
        debug!("TestServer: built a {} byte buffer", bytes.len());
        bytes
    }
}

fn encode_variant<V: Variant>(value: &V) -> Vec<u8> {
    let mut writer = TagWriter::new();
    Mapper::encode_as(value, &mut writer)
        .unwrap_or_else(|err| panic!("variant fixture does not encode: {err}"));
    writer.to_bytes()
}
