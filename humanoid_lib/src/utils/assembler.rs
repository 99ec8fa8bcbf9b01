use crate::{BasePose, Joint, JointPositions, RobotConfiguration};

/// Merges the latest base pose and joint vector into one configuration:
/// pose at offset 0, each joint at its canonical index.
pub fn assemble_configuration(pose: &BasePose, joints: &JointPositions) -> RobotConfiguration {
    let mut q = RobotConfiguration::zeros();
    q.set_base_pose(pose);

    for joint in Joint::ALL {
        q.set_joint(joint, joints.get(joint));
    }

    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CONFIGURATION_DIM;

    #[test]
    fn test_pose_and_joints_land_at_fixed_offsets() {
        let pose = BasePose {
            position: [1.0, 2.0, 3.0],
            orientation: [0.0, 0.0, 0.0, 1.0],
        };
        let mut joints = JointPositions::zeros();
        joints.set(Joint::LeftHipYaw, 0.5);
        joints.set(Joint::RightForearmYaw, -0.5);

        let q = assemble_configuration(&pose, &joints);

        assert_eq!(q.as_slice().len(), CONFIGURATION_DIM);
        assert_eq!(&q.as_slice()[..7], &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(q.as_slice()[7], 0.5);
        assert_eq!(q.as_slice()[CONFIGURATION_DIM - 1], -0.5);
        assert_eq!(q.joint(Joint::TorsoYaw), 0.0);
    }

    #[test]
    fn test_unknown_names_leave_configuration_untouched() {
        let pose = BasePose::identity();
        let baseline = assemble_configuration(&pose, &JointPositions::zeros());

        let mapping = JointPositions::from_named(
            &["r2_joint".to_string(), "leftIndexFinger".to_string()],
            &[3.0, 4.0],
        );
        let q = assemble_configuration(&pose, &mapping.positions);

        assert_eq!(q, baseline);
    }
}
