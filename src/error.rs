use thiserror::Error;

/// Errors that can occur when using the blackboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A data operation was invoked while no process-wide instance exists.
    ///
    /// This signals a caller bug, not a transient condition: `create()` must
    /// run before any data operation, and nothing may run after `destroy()`.
    #[error("blackboard is not ready; call create() before using it")]
    NotReady,

    /// No value of the requested type has been written under this key.
    ///
    /// Callers that expect absence should probe with `contains_key` first;
    /// the blackboard never fabricates a default value for a missing entry.
    #[error("no `{type_name}` value stored under key `{key}`")]
    KeyNotFound {
        /// The key that was looked up.
        key: String,
        /// Name of the type whose store was searched.
        type_name: &'static str,
    },
}

impl BoardError {
    pub(crate) fn key_not_found<T>(key: &str) -> Self {
        BoardError::KeyNotFound {
            key: key.to_owned(),
            type_name: std::any::type_name::<T>(),
        }
    }
}
