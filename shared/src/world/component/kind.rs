use std::{any::TypeId, fmt};

use super::{component::Component, slots::ComponentSlots};

/// Everything needed to create a component type at spawn time without
/// naming it: a constructor and its slot declaration.
#[derive(Clone, Copy)]
pub struct ComponentKind {
    type_id: TypeId,
    name: &'static str,
    create: fn() -> Box<dyn Component>,
    slots: fn() -> ComponentSlots,
}

impl ComponentKind {
    pub fn of<C: Component + Default>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
            create: || Box::new(C::default()),
            slots: || C::slots().into_slots(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn create(&self) -> Box<dyn Component> {
        (self.create)()
    }

    pub(crate) fn scan_slots(&self) -> ComponentSlots {
        (self.slots)()
    }
}

impl PartialEq for ComponentKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentKind {}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentKind").field(&self.name).finish()
    }
}
