use std::any::Any;

use axon_serde::Value;

use super::slots::SlotTable;

/// Upcast helper so boxed components can be downcast to their concrete type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A piece of entity state whose fields are written by replicated changes.
///
/// `slots` declares which field each type id writes to. It is called once
/// per component type and the result is cached, so it should not depend on
/// any instance state.
pub trait Component: AsAny + 'static {
    fn slots() -> SlotTable<Self>
    where
        Self: Sized;

    /// Called after a replicated change for `type_id` was written into this
    /// component.
    fn on_value_changed(&mut self, _type_id: u32) {}

    /// Called for an inbound invoke addressed to this component's entity.
    fn invoke(&mut self, _type_id: u32, _value: &Value) {}
}
