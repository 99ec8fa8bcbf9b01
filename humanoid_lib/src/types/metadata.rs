use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandSource {
    WholeBodyInterface,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub command_id: String,
    /// Milliseconds since Unix epoch
    pub timestamp: u64,
    pub source: CommandSource,
}

impl CommandMetadata {
    pub fn new(source: CommandSource) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            timestamp: now_millis(),
            source,
        }
    }
}

/// Envelope for every command leaving the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandWithMetadata<T> {
    pub command: T,
    pub metadata: CommandMetadata,
}

impl<T> CommandWithMetadata<T> {
    pub fn new(command: T) -> Self {
        Self {
            command,
            metadata: CommandMetadata::new(CommandSource::WholeBodyInterface),
        }
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

pub fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_layout() {
        let envelope = CommandWithMetadata::new("HOME-CHEST");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["command"], "HOME-CHEST");
        assert_eq!(json["metadata"]["source"], "WholeBodyInterface");
        assert_eq!(envelope.metadata.command_id.len(), 36);
        assert!(envelope.metadata.timestamp > 0);
    }

    #[test]
    fn test_command_ids_are_unique() {
        let a = CommandMetadata::new(CommandSource::WholeBodyInterface);
        let b = CommandMetadata::new(CommandSource::WholeBodyInterface);
        assert_ne!(a.command_id, b.command_id);
    }

    #[test]
    fn test_nanosecond_clock() {
        let millis = now_millis() as i64;
        let nanos = now_nanos();
        assert!(nanos / 1_000_000 >= millis);
    }
}
