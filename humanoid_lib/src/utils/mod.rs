pub mod assembler;
pub mod composer;
pub mod kinematics;
pub mod tracing;

pub use assembler::*;
pub use composer::*;
pub use kinematics::*;
pub use self::tracing::*;
