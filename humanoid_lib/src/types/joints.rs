use std::fmt;
use std::str::FromStr;

/// Base pose entries at the head of the configuration vector: x, y, z, qx, qy, qz, qw.
pub const BASE_POSE_DIM: usize = 7;
pub const NUM_ACTUATED_JOINTS: usize = 28;
pub const CONFIGURATION_DIM: usize = BASE_POSE_DIM + NUM_ACTUATED_JOINTS;

/// Actuated joints in canonical configuration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    LeftHipYaw,
    LeftHipRoll,
    LeftHipPitch,
    LeftKneePitch,
    LeftAnklePitch,
    LeftAnkleRoll,
    RightHipYaw,
    RightHipRoll,
    RightHipPitch,
    RightKneePitch,
    RightAnklePitch,
    RightAnkleRoll,
    TorsoYaw,
    TorsoPitch,
    TorsoRoll,
    LeftShoulderPitch,
    LeftShoulderRoll,
    LeftShoulderYaw,
    LeftElbowPitch,
    LeftForearmYaw,
    LowerNeckPitch,
    NeckYaw,
    UpperNeckPitch,
    RightShoulderPitch,
    RightShoulderRoll,
    RightShoulderYaw,
    RightElbowPitch,
    RightForearmYaw,
}

impl Joint {
    pub const ALL: [Joint; NUM_ACTUATED_JOINTS] = [
        Joint::LeftHipYaw,
        Joint::LeftHipRoll,
        Joint::LeftHipPitch,
        Joint::LeftKneePitch,
        Joint::LeftAnklePitch,
        Joint::LeftAnkleRoll,
        Joint::RightHipYaw,
        Joint::RightHipRoll,
        Joint::RightHipPitch,
        Joint::RightKneePitch,
        Joint::RightAnklePitch,
        Joint::RightAnkleRoll,
        Joint::TorsoYaw,
        Joint::TorsoPitch,
        Joint::TorsoRoll,
        Joint::LeftShoulderPitch,
        Joint::LeftShoulderRoll,
        Joint::LeftShoulderYaw,
        Joint::LeftElbowPitch,
        Joint::LeftForearmYaw,
        Joint::LowerNeckPitch,
        Joint::NeckYaw,
        Joint::UpperNeckPitch,
        Joint::RightShoulderPitch,
        Joint::RightShoulderRoll,
        Joint::RightShoulderYaw,
        Joint::RightElbowPitch,
        Joint::RightForearmYaw,
    ];

    /// Position among the actuated joints (0-based, base pose excluded).
    pub fn actuated_index(&self) -> usize {
        *self as usize
    }

    /// Position in the full configuration vector.
    pub fn configuration_index(&self) -> usize {
        BASE_POSE_DIM + self.actuated_index()
    }

    /// Name as published on joint state topics.
    pub fn name(&self) -> &'static str {
        match self {
            Joint::LeftHipYaw => "leftHipYaw",
            Joint::LeftHipRoll => "leftHipRoll",
            Joint::LeftHipPitch => "leftHipPitch",
            Joint::LeftKneePitch => "leftKneePitch",
            Joint::LeftAnklePitch => "leftAnklePitch",
            Joint::LeftAnkleRoll => "leftAnkleRoll",
            Joint::RightHipYaw => "rightHipYaw",
            Joint::RightHipRoll => "rightHipRoll",
            Joint::RightHipPitch => "rightHipPitch",
            Joint::RightKneePitch => "rightKneePitch",
            Joint::RightAnklePitch => "rightAnklePitch",
            Joint::RightAnkleRoll => "rightAnkleRoll",
            Joint::TorsoYaw => "torsoYaw",
            Joint::TorsoPitch => "torsoPitch",
            Joint::TorsoRoll => "torsoRoll",
            Joint::LeftShoulderPitch => "leftShoulderPitch",
            Joint::LeftShoulderRoll => "leftShoulderRoll",
            Joint::LeftShoulderYaw => "leftShoulderYaw",
            Joint::LeftElbowPitch => "leftElbowPitch",
            Joint::LeftForearmYaw => "leftForearmYaw",
            Joint::LowerNeckPitch => "lowerNeckPitch",
            Joint::NeckYaw => "neckYaw",
            Joint::UpperNeckPitch => "upperNeckPitch",
            Joint::RightShoulderPitch => "rightShoulderPitch",
            Joint::RightShoulderRoll => "rightShoulderRoll",
            Joint::RightShoulderYaw => "rightShoulderYaw",
            Joint::RightElbowPitch => "rightElbowPitch",
            Joint::RightForearmYaw => "rightForearmYaw",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Joint {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Joint::ALL
            .iter()
            .copied()
            .find(|joint| joint.name() == s)
            .ok_or_else(|| eyre::eyre!("Unknown joint name '{}'", s))
    }
}

/// One entry of a per-body-part joint list. Command schemas sometimes expect
/// joints the configuration model does not have; those slots are zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointSlot {
    Real(Joint),
    ZeroFilled,
}

impl JointSlot {
    pub fn resolve(&self, configuration: &[f64]) -> f64 {
        match self {
            JointSlot::Real(joint) => configuration[joint.configuration_index()],
            JointSlot::ZeroFilled => 0.0,
        }
    }
}

/// Slots per arm expected by the arm trajectory schema.
pub const ARM_SLOT_COUNT: usize = 7;
pub const NECK_SLOT_COUNT: usize = 3;

// wrist roll and wrist pitch are not part of the model
pub const LEFT_ARM_SLOTS: [JointSlot; ARM_SLOT_COUNT] = [
    JointSlot::Real(Joint::LeftShoulderPitch),
    JointSlot::Real(Joint::LeftShoulderRoll),
    JointSlot::Real(Joint::LeftShoulderYaw),
    JointSlot::Real(Joint::LeftElbowPitch),
    JointSlot::Real(Joint::LeftForearmYaw),
    JointSlot::ZeroFilled,
    JointSlot::ZeroFilled,
];

pub const RIGHT_ARM_SLOTS: [JointSlot; ARM_SLOT_COUNT] = [
    JointSlot::Real(Joint::RightShoulderPitch),
    JointSlot::Real(Joint::RightShoulderRoll),
    JointSlot::Real(Joint::RightShoulderYaw),
    JointSlot::Real(Joint::RightElbowPitch),
    JointSlot::Real(Joint::RightForearmYaw),
    JointSlot::ZeroFilled,
    JointSlot::ZeroFilled,
];

pub const NECK_SLOTS: [JointSlot; NECK_SLOT_COUNT] = [
    JointSlot::Real(Joint::LowerNeckPitch),
    JointSlot::Real(Joint::NeckYaw),
    JointSlot::Real(Joint::UpperNeckPitch),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_indices() {
        for (i, joint) in Joint::ALL.iter().enumerate() {
            assert_eq!(joint.actuated_index(), i);
            assert_eq!(joint.configuration_index(), BASE_POSE_DIM + i);
        }
        assert_eq!(Joint::RightForearmYaw.configuration_index(), CONFIGURATION_DIM - 1);
    }

    #[test]
    fn test_name_lookup() {
        for joint in Joint::ALL {
            assert_eq!(joint.name().parse::<Joint>().unwrap(), joint);
        }
        assert!("leftWristRoll".parse::<Joint>().is_err());
        assert!("LEFTHIPYAW".parse::<Joint>().is_err());
    }

    #[test]
    fn test_arm_slots_have_two_trailing_sentinels() {
        for slots in [LEFT_ARM_SLOTS, RIGHT_ARM_SLOTS] {
            assert_eq!(slots.len(), ARM_SLOT_COUNT);
            let sentinels = slots.iter().filter(|s| **s == JointSlot::ZeroFilled).count();
            assert_eq!(sentinels, 2);
            assert_eq!(slots[5], JointSlot::ZeroFilled);
            assert_eq!(slots[6], JointSlot::ZeroFilled);
        }
    }

    #[test]
    fn test_neck_slots_are_real() {
        assert!(NECK_SLOTS.iter().all(|s| matches!(s, JointSlot::Real(_))));
    }

    #[test]
    fn test_zero_filled_ignores_configuration() {
        let q = vec![42.0; CONFIGURATION_DIM];
        assert_eq!(JointSlot::ZeroFilled.resolve(&q), 0.0);
        assert_eq!(JointSlot::Real(Joint::NeckYaw).resolve(&q), 42.0);
    }
}
