use crate::{Joint, Pose, Quaternion, Vector3, BASE_POSE_DIM, CONFIGURATION_DIM, NUM_ACTUATED_JOINTS};
use eyre::Result;
use serde::{Deserialize, Serialize};

/// World-referenced pose of the floating base (pelvis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasePose {
    /// [x, y, z] in meters
    pub position: [f64; 3],
    /// [x, y, z, w]
    pub orientation: [f64; 4],
}

impl BasePose {
    pub fn identity() -> Self {
        Self {
            position: [0.0; 3],
            orientation: [0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn to_pose(&self) -> Pose {
        Pose::new(
            Vector3::from_array(self.position),
            Quaternion::from_array(self.orientation),
        )
    }
}

/// Actuated joint positions in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPositions {
    values: Vec<f64>,
}

/// Outcome of mapping a named joint state onto the canonical table.
#[derive(Debug, Clone, PartialEq)]
pub struct JointMapping {
    pub positions: JointPositions,
    pub matched: usize,
    pub ignored: Vec<String>,
}

impl JointPositions {
    pub fn zeros() -> Self {
        Self {
            values: vec![0.0; NUM_ACTUATED_JOINTS],
        }
    }

    /// Builds a fresh vector from parallel name/value arrays. Names outside the
    /// canonical table are reported back but otherwise ignored; joints that are
    /// not reported stay at zero.
    pub fn from_named(names: &[String], values: &[f64]) -> JointMapping {
        let mut positions = Self::zeros();
        let mut matched = 0;
        let mut ignored = Vec::new();

        for (name, &value) in names.iter().zip(values.iter()) {
            match name.parse::<Joint>() {
                Ok(joint) => {
                    positions.set(joint, value);
                    matched += 1;
                }
                Err(_) => ignored.push(name.clone()),
            }
        }

        JointMapping {
            positions,
            matched,
            ignored,
        }
    }

    pub fn get(&self, joint: Joint) -> f64 {
        self.values[joint.actuated_index()]
    }

    pub fn set(&mut self, joint: Joint, value: f64) {
        self.values[joint.actuated_index()] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl Default for JointPositions {
    fn default() -> Self {
        Self::zeros()
    }
}

/// Full generalized configuration: base pose followed by actuated joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfiguration {
    q: Vec<f64>,
}

impl RobotConfiguration {
    pub fn zeros() -> Self {
        Self {
            q: vec![0.0; CONFIGURATION_DIM],
        }
    }

    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != CONFIGURATION_DIM {
            return Err(eyre::eyre!(
                "Configuration length {} doesn't match model dimension {}",
                values.len(),
                CONFIGURATION_DIM
            ));
        }

        Ok(Self { q: values.to_vec() })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.q
    }

    pub fn joint(&self, joint: Joint) -> f64 {
        self.q[joint.configuration_index()]
    }

    pub fn base_position(&self) -> [f64; 3] {
        [self.q[0], self.q[1], self.q[2]]
    }

    /// Base orientation in x, y, z, w order.
    pub fn base_orientation(&self) -> [f64; 4] {
        [self.q[3], self.q[4], self.q[5], self.q[6]]
    }

    pub fn base_pose(&self) -> BasePose {
        BasePose {
            position: self.base_position(),
            orientation: self.base_orientation(),
        }
    }

    pub(crate) fn set_base_pose(&mut self, pose: &BasePose) {
        self.q[..3].copy_from_slice(&pose.position);
        self.q[3..BASE_POSE_DIM].copy_from_slice(&pose.orientation);
    }

    pub(crate) fn set_joint(&mut self, joint: Joint, value: f64) {
        self.q[joint.configuration_index()] = value;
    }
}

impl Default for RobotConfiguration {
    fn default() -> Self {
        Self::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unknown_joint_names_are_ignored() {
        let mapping = JointPositions::from_named(
            &names(&["neckYaw", "hokuyo_joint", "leftWristRoll"]),
            &[0.4, 9.0, 9.0],
        );

        assert_eq!(mapping.matched, 1);
        assert_eq!(mapping.ignored, names(&["hokuyo_joint", "leftWristRoll"]));
        assert_eq!(mapping.positions.get(Joint::NeckYaw), 0.4);

        let untouched = mapping
            .positions
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != Joint::NeckYaw.actuated_index())
            .all(|(_, v)| *v == 0.0);
        assert!(untouched);
    }

    #[test]
    fn test_out_of_order_names() {
        let mapping = JointPositions::from_named(
            &names(&["rightForearmYaw", "leftHipYaw"]),
            &[-1.0, 1.0],
        );
        assert_eq!(mapping.positions.get(Joint::RightForearmYaw), -1.0);
        assert_eq!(mapping.positions.get(Joint::LeftHipYaw), 1.0);
    }

    #[test]
    fn test_mismatched_lengths_pair_up_to_shorter() {
        let mapping = JointPositions::from_named(&names(&["torsoYaw", "torsoPitch"]), &[0.2]);
        assert_eq!(mapping.matched, 1);
        assert_eq!(mapping.positions.get(Joint::TorsoPitch), 0.0);
    }

    #[test]
    fn test_configuration_length_checked() {
        assert!(RobotConfiguration::from_slice(&[0.0; 7]).is_err());
        assert!(RobotConfiguration::from_slice(&[0.0; CONFIGURATION_DIM]).is_ok());
    }

    #[test]
    fn test_base_pose_slices() {
        let mut values = vec![0.0; CONFIGURATION_DIM];
        values[..7].copy_from_slice(&[1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 0.9]);
        let q = RobotConfiguration::from_slice(&values).unwrap();

        assert_eq!(q.base_position(), [1.0, 2.0, 3.0]);
        assert_eq!(q.base_orientation(), [0.1, 0.2, 0.3, 0.9]);
    }
}
