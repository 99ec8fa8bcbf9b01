use crate::{BodyPart, ChainLink, Joint, KinematicsConfig, Pose, Quaternion, RobotConfiguration};
use eyre::Result;
use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

/// Resolves the world pose of a link for a given configuration.
///
/// The composer only depends on this trait, so tests can hand it fixed poses
/// and deployments can plug in a full kinematic model.
pub trait PoseProvider {
    fn pose_of(&self, part: BodyPart, configuration: &RobotConfiguration) -> Result<Pose>;
}

struct RevoluteLink {
    joint: Joint,
    origin: Vector3<f64>,
    axis: Unit<Vector3<f64>>,
}

impl RevoluteLink {
    fn from_config(link: &ChainLink) -> Result<Self> {
        let joint = link.joint.parse::<Joint>()?;
        let axis = Unit::try_new(Vector3::from(link.axis), 1e-9)
            .ok_or_else(|| eyre::eyre!("Joint {} has a zero rotation axis", joint))?;

        Ok(Self {
            joint,
            origin: Vector3::from(link.origin),
            axis,
        })
    }

    fn transform(&self, angle: f64) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.origin),
            UnitQuaternion::from_axis_angle(&self.axis, angle),
        )
    }
}

/// Serial-chain forward kinematics rooted at the floating base.
pub struct ChainKinematics {
    torso_chain: Vec<RevoluteLink>,
}

impl ChainKinematics {
    pub fn new(config: &KinematicsConfig) -> Result<Self> {
        let torso_chain = config
            .torso_chain
            .iter()
            .map(RevoluteLink::from_config)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { torso_chain })
    }

    fn base_transform(configuration: &RobotConfiguration) -> Isometry3<f64> {
        let [x, y, z] = configuration.base_position();
        let [qx, qy, qz, qw] = configuration.base_orientation();

        let raw = nalgebra::Quaternion::new(qw, qx, qy, qz);
        // an unset pose reads as all zeros
        let rotation = if raw.norm() > 1e-9 {
            UnitQuaternion::from_quaternion(raw)
        } else {
            UnitQuaternion::identity()
        };

        Isometry3::from_parts(Translation3::new(x, y, z), rotation)
    }

    fn torso_transform(&self, configuration: &RobotConfiguration) -> Isometry3<f64> {
        self.torso_chain
            .iter()
            .fold(Self::base_transform(configuration), |parent, link| {
                parent * link.transform(configuration.joint(link.joint))
            })
    }
}

impl PoseProvider for ChainKinematics {
    fn pose_of(&self, part: BodyPart, configuration: &RobotConfiguration) -> Result<Pose> {
        match part {
            BodyPart::Pelvis => Ok(to_pose(&Self::base_transform(configuration))),
            BodyPart::Torso => Ok(to_pose(&self.torso_transform(configuration))),
            other => Err(eyre::eyre!("No kinematic chain configured for {}", other)),
        }
    }
}

fn to_pose(transform: &Isometry3<f64>) -> Pose {
    let t = transform.translation.vector;
    let c = transform.rotation.quaternion().coords;

    Pose::new(
        crate::Vector3::new(t.x, t.y, t.z),
        Quaternion::new(c[0], c[1], c[2], c[3]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CONFIGURATION_DIM;
    use std::f64::consts::FRAC_PI_2;

    fn configuration_with(edit: impl FnOnce(&mut Vec<f64>)) -> RobotConfiguration {
        let mut values = vec![0.0; CONFIGURATION_DIM];
        values[6] = 1.0;
        edit(&mut values);
        RobotConfiguration::from_slice(&values).unwrap()
    }

    #[test]
    fn test_zero_configuration_keeps_identity_orientation() {
        let kinematics = ChainKinematics::new(&KinematicsConfig::default()).unwrap();
        let pose = kinematics
            .pose_of(BodyPart::Torso, &configuration_with(|_| {}))
            .unwrap();

        assert!((pose.orientation.w - 1.0).abs() < 1e-9);
        assert!(pose.orientation.x.abs() < 1e-9);
        assert!((pose.position.x - 0.04191).abs() < 1e-9);
        assert!((pose.position.z - 0.0203).abs() < 1e-9);
    }

    #[test]
    fn test_torso_yaw_rotates_chest() {
        let kinematics = ChainKinematics::new(&KinematicsConfig::default()).unwrap();
        let q = configuration_with(|v| v[Joint::TorsoYaw.configuration_index()] = FRAC_PI_2);
        let pose = kinematics.pose_of(BodyPart::Torso, &q).unwrap();

        let half = (FRAC_PI_2 / 2.0).sin();
        assert!((pose.orientation.z - half).abs() < 1e-9);
        assert!((pose.orientation.w - half).abs() < 1e-9);
    }

    #[test]
    fn test_pelvis_follows_base_pose() {
        let kinematics = ChainKinematics::new(&KinematicsConfig::default()).unwrap();
        let q = configuration_with(|v| v[..3].copy_from_slice(&[1.0, 2.0, 3.0]));
        let pose = kinematics.pose_of(BodyPart::Pelvis, &q).unwrap();

        assert_eq!(pose.position, crate::Vector3::new(1.0, 2.0, 3.0));
        assert!((pose.orientation.w - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_base_quaternion_treated_as_identity() {
        let kinematics = ChainKinematics::new(&KinematicsConfig::default()).unwrap();
        let q = RobotConfiguration::zeros();
        let pose = kinematics.pose_of(BodyPart::Torso, &q).unwrap();

        assert!(pose.orientation.w.is_finite());
        assert!((pose.orientation.w - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_part_is_an_error() {
        let kinematics = ChainKinematics::new(&KinematicsConfig::default()).unwrap();
        assert!(kinematics
            .pose_of(BodyPart::Head, &RobotConfiguration::zeros())
            .is_err());
    }

    #[test]
    fn test_bad_chain_rejected() {
        let mut config = KinematicsConfig::default();
        config.torso_chain[0].axis = [0.0, 0.0, 0.0];
        assert!(ChainKinematics::new(&config).is_err());

        let mut config = KinematicsConfig::default();
        config.torso_chain[0].joint = "waist".to_string();
        assert!(ChainKinematics::new(&config).is_err());
    }
}
