//! Minimal protocol for end-to-end tests: a few variants, the components
//! they are written into, and the templates that spawn them.

use axon_client::{Component, RegistryPlugin, SlotTable, Template, TypeRegistry, Value};
use axon_shared::{Describe, Shape, Variant};
use serde::{Deserialize, Serialize};

pub const PLAYER: u32 = 1;
pub const MONSTER: u32 = 2;
pub const BILLBOARD: u32 = 3;

/// Registered schema-less, so either component bound to it may fail to
/// convert the decoded value.
pub const LABEL: u32 = 1004;

#[derive(Describe, Variant, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[type_id = 1000]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Describe, Variant, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[type_id = 1001]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

#[derive(Describe, Variant, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[type_id = 1002]
pub struct Hero {
    pub name: String,
    pub level: i32,
    pub health: f32,
}

#[derive(Describe, Variant, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[type_id = 1003]
pub struct Tint(pub u32);

/// Sent by the client; its type id comes from its path.
#[derive(Describe, Variant, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Emote {
    #[describe(required)]
    pub name: String,
    pub target: Option<u64>,
}

// Components

#[derive(Default)]
pub struct Transform {
    pub position: Position,
    pub changes: Vec<u32>,
}

impl Component for Transform {
    fn slots() -> SlotTable<Self> {
        SlotTable::new().bind_variant::<Position>("position", |transform: &mut Transform| {
            &mut transform.position
        })
    }

    fn on_value_changed(&mut self, type_id: u32) {
        self.changes.push(type_id);
    }
}

#[derive(Default)]
pub struct Sprite {
    pub tint: Tint,
    pub changes: Vec<u32>,
    pub invokes: Vec<(u32, Value)>,
}

impl Component for Sprite {
    fn slots() -> SlotTable<Self> {
        SlotTable::new().bind_variant::<Tint>("tint", |sprite: &mut Sprite| &mut sprite.tint)
    }

    fn on_value_changed(&mut self, type_id: u32) {
        self.changes.push(type_id);
    }

    fn invoke(&mut self, type_id: u32, value: &Value) {
        self.invokes.push((type_id, value.clone()));
    }
}

#[derive(Default)]
pub struct Vitals {
    pub health: Health,
    pub hero: Hero,
}

impl Component for Vitals {
    fn slots() -> SlotTable<Self> {
        SlotTable::new()
            .bind_variant::<Health>("health", |vitals: &mut Vitals| &mut vitals.health)
            .bind_variant::<Hero>("hero", |vitals: &mut Vitals| &mut vitals.hero)
    }
}

#[derive(Default)]
pub struct Nameplate {
    pub label: String,
    pub changes: usize,
}

impl Component for Nameplate {
    fn slots() -> SlotTable<Self> {
        SlotTable::new().bind(LABEL, "label", |plate: &mut Nameplate| &mut plate.label)
    }

    fn on_value_changed(&mut self, _type_id: u32) {
        self.changes += 1;
    }
}

#[derive(Default)]
pub struct Counter {
    pub count: u32,
    pub changes: usize,
}

impl Component for Counter {
    fn slots() -> SlotTable<Self> {
        SlotTable::new().bind(LABEL, "count", |counter: &mut Counter| &mut counter.count)
    }

    fn on_value_changed(&mut self, _type_id: u32) {
        self.changes += 1;
    }
}

// Protocol

pub struct TestProtocol;

impl RegistryPlugin for TestProtocol {
    fn build(&self, registry: &mut TypeRegistry) {
        registry
            .add_variant::<Position>()
            .add_variant::<Health>()
            .add_variant::<Hero>()
            .add_variant::<Tint>()
            .add_variant::<Emote>()
            .register(LABEL, "Label", Shape::Any)
            .add_template(
                PLAYER,
                Template::new("Player")
                    .with_component::<Transform>()
                    .with_component::<Sprite>(),
            )
            .add_template(
                MONSTER,
                Template::new("Monster")
                    .with_component::<Transform>()
                    .with_component::<Vitals>(),
            )
            .add_template(
                BILLBOARD,
                Template::new("Billboard")
                    .with_component::<Nameplate>()
                    .with_component::<Counter>(),
            );
    }
}

/// A fresh, unlocked registry holding the test protocol.
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.add_plugin(TestProtocol);
    registry
}
