use crate::world::component::{component::Component, kind::ComponentKind};

/// A spawn blueprint: the components an entity is created with, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    components: Vec<ComponentKind>,
}

impl Template {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            components: Vec::new(),
        }
    }

    pub fn with_component<C: Component + Default>(mut self) -> Self {
        self.components.push(ComponentKind::of::<C>());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[ComponentKind] {
        &self.components
    }
}
