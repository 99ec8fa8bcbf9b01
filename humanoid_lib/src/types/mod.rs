pub mod body_part;
pub mod config;
pub mod configuration;
pub mod geometry;
pub mod hand_command;
pub mod home_command;
pub mod inputs;
pub mod joints;
pub mod message_params;
pub mod metadata;
pub mod whole_body_command;

pub use body_part::*;
pub use config::*;
pub use configuration::*;
pub use geometry::*;
pub use hand_command::*;
pub use home_command::*;
pub use inputs::*;
pub use joints::*;
pub use message_params::*;
pub use metadata::*;
pub use whole_body_command::*;
