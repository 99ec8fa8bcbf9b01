use crate::{JointspaceTrajectory, RobotSide};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandAction {
    Open,
    Close,
}

/// Open or close every finger of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandGesture {
    pub side: RobotSide,
    pub action: HandAction,
}

impl HandGesture {
    pub fn new(side: RobotSide, action: HandAction) -> Self {
        Self { side, action }
    }
}

/// Finger motors of the hand, wire values 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerMotor {
    ThumbMotorRoll,
    ThumbMotorPitch1,
    ThumbMotorPitch2,
    IndexFingerMotorPitch1,
    MiddleFingerMotorPitch1,
    PinkyMotorPitch1,
}

impl FingerMotor {
    pub const ALL: [FingerMotor; 6] = [
        FingerMotor::ThumbMotorRoll,
        FingerMotor::ThumbMotorPitch1,
        FingerMotor::ThumbMotorPitch2,
        FingerMotor::IndexFingerMotorPitch1,
        FingerMotor::MiddleFingerMotorPitch1,
        FingerMotor::PinkyMotorPitch1,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFingerTrajectory {
    pub sequence_id: i64,
    pub robot_side: RobotSide,
    pub finger_motor_names: Vec<FingerMotor>,
    pub jointspace_trajectory: JointspaceTrajectory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finger_motor_codes() {
        let codes: Vec<u8> = FingerMotor::ALL.iter().map(|motor| motor.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_gestures_order_by_side_then_action() {
        let mut gestures = vec![
            HandGesture::new(RobotSide::Right, HandAction::Open),
            HandGesture::new(RobotSide::Left, HandAction::Close),
            HandGesture::new(RobotSide::Left, HandAction::Open),
        ];
        gestures.sort();

        assert_eq!(gestures[0], HandGesture::new(RobotSide::Left, HandAction::Open));
        assert_eq!(gestures[2].side, RobotSide::Right);
    }
}
