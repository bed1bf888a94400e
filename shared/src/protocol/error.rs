use thiserror::Error;

/// Errors that can occur while populating or querying the type registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Registry is locked and cannot be modified
    #[error("TypeRegistry is already locked and cannot be modified. The registry is locked once a replication engine takes it, all registration must happen before that")]
    AlreadyLocked,

    /// A type id was registered again with a different shape
    #[error("Type id {type_id} is already registered as '{existing}', refusing to re-register it as '{incoming}'")]
    ConflictingDescriptor {
        type_id: u32,
        existing: String,
        incoming: String,
    },

    /// No variant is registered under the type id
    #[error("Type id {type_id} is not registered")]
    NotFound { type_id: u32 },

    /// No spawn template is registered under the type id
    #[error("No spawn template is registered for type id {type_id}")]
    TemplateNotFound { type_id: u32 },
}
