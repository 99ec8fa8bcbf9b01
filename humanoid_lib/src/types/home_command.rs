use crate::RobotSide;
use serde::{Deserialize, Serialize};

/// Body part that can be sent back to its home configuration.
/// Declaration order is the order pending requests are drained in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeTarget {
    LeftArm,
    RightArm,
    Chest,
    Pelvis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanoidBodyPart {
    Arm,
    Chest,
    Pelvis,
}

impl HomeTarget {
    pub fn body_part(&self) -> HumanoidBodyPart {
        match self {
            HomeTarget::LeftArm | HomeTarget::RightArm => HumanoidBodyPart::Arm,
            HomeTarget::Chest => HumanoidBodyPart::Chest,
            HomeTarget::Pelvis => HumanoidBodyPart::Pelvis,
        }
    }

    pub fn side(&self) -> Option<RobotSide> {
        match self {
            HomeTarget::LeftArm => Some(RobotSide::Left),
            HomeTarget::RightArm => Some(RobotSide::Right),
            HomeTarget::Chest | HomeTarget::Pelvis => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoHomeCommand {
    pub humanoid_body_part: HumanoidBodyPart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robot_side: Option<RobotSide>,
    /// Seconds to reach the home configuration
    pub trajectory_time: f64,
}

impl GoHomeCommand {
    pub fn target(&self) -> HomeTarget {
        match (self.humanoid_body_part, self.robot_side) {
            (HumanoidBodyPart::Arm, Some(RobotSide::Right)) => HomeTarget::RightArm,
            (HumanoidBodyPart::Arm, _) => HomeTarget::LeftArm,
            (HumanoidBodyPart::Chest, _) => HomeTarget::Chest,
            (HumanoidBodyPart::Pelvis, _) => HomeTarget::Pelvis,
        }
    }
}
