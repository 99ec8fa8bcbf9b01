//! Whole-body trajectory command tree consumed by the humanoid controller.
//!
//! Field names follow the controller's message definitions so the JSON can be
//! forwarded by a bridge without renaming.

use crate::{ExecutionMode, Pose, Quaternion, RobotSide, Vector3};
use serde::{Deserialize, Serialize};

/// Queue/override/stream descriptor attached to every trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueingProperties {
    pub sequence_id: i64,
    pub execution_mode: ExecutionMode,
    pub message_id: i64,
    /// Present only in queue mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_message_id: Option<i64>,
    /// Present only in stream mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_integration_duration: Option<f64>,
    /// Creation time in nanoseconds since Unix epoch
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInformation {
    pub sequence_id: i64,
    pub trajectory_reference_frame_id: i64,
    pub data_reference_frame_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionMatrix3D {
    pub sequence_id: i64,
    pub selection_frame_id: i64,
    pub x_selected: bool,
    pub y_selected: bool,
    pub z_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix3D {
    pub sequence_id: i64,
    pub weight_frame_id: i64,
    pub x_weight: f64,
    pub y_weight: f64,
    pub z_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint1D {
    pub sequence_id: i64,
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneDoFJointTrajectory {
    pub sequence_id: i64,
    pub weight: f64,
    pub trajectory_points: Vec<TrajectoryPoint1D>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointspaceTrajectory {
    pub sequence_id: i64,
    pub queueing_properties: QueueingProperties,
    pub joint_trajectory_messages: Vec<OneDoFJointTrajectory>,
}

impl JointspaceTrajectory {
    /// Target position of every joint, in slot order.
    pub fn positions(&self) -> Vec<f64> {
        self.joint_trajectory_messages
            .iter()
            .filter_map(|joint| joint.trajectory_points.first())
            .map(|point| point.position)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct So3TrajectoryPoint {
    pub sequence_id: i64,
    pub time: f64,
    pub orientation: Quaternion,
    pub angular_velocity: Vector3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Se3TrajectoryPoint {
    pub sequence_id: i64,
    pub time: f64,
    pub position: Vector3,
    pub orientation: Quaternion,
    pub linear_velocity: Vector3,
    pub angular_velocity: Vector3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct So3Trajectory {
    pub sequence_id: i64,
    pub use_custom_control_frame: bool,
    pub control_frame_pose: Pose,
    pub queueing_properties: QueueingProperties,
    pub frame_information: FrameInformation,
    pub selection_matrix: SelectionMatrix3D,
    pub weight_matrix: WeightMatrix3D,
    pub taskspace_trajectory_points: Vec<So3TrajectoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Se3Trajectory {
    pub sequence_id: i64,
    pub use_custom_control_frame: bool,
    pub control_frame_pose: Pose,
    pub queueing_properties: QueueingProperties,
    pub frame_information: FrameInformation,
    pub angular_selection_matrix: SelectionMatrix3D,
    pub linear_selection_matrix: SelectionMatrix3D,
    pub angular_weight_matrix: WeightMatrix3D,
    pub linear_weight_matrix: WeightMatrix3D,
    pub taskspace_trajectory_points: Vec<Se3TrajectoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmTrajectory {
    pub sequence_id: i64,
    pub robot_side: RobotSide,
    pub force_execution: bool,
    pub jointspace_trajectory: JointspaceTrajectory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChestTrajectory {
    pub sequence_id: i64,
    pub so3_trajectory: So3Trajectory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PelvisTrajectory {
    pub sequence_id: i64,
    pub force_execution: bool,
    pub enable_user_pelvis_control: bool,
    pub enable_user_pelvis_control_during_walking: bool,
    pub se3_trajectory: Se3Trajectory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeckTrajectory {
    pub sequence_id: i64,
    pub jointspace_trajectory: JointspaceTrajectory,
}

/// Root of the command tree. Foot, spine, hand and head trajectories are
/// never populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholeBodyTrajectory {
    pub sequence_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_arm_trajectory_message: Option<ArmTrajectory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_arm_trajectory_message: Option<ArmTrajectory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_trajectory_message: Option<ChestTrajectory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pelvis_trajectory_message: Option<PelvisTrajectory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neck_trajectory_message: Option<NeckTrajectory>,
}

impl WholeBodyTrajectory {
    pub fn new(sequence_id: i64) -> Self {
        Self {
            sequence_id,
            left_arm_trajectory_message: None,
            right_arm_trajectory_message: None,
            chest_trajectory_message: None,
            pelvis_trajectory_message: None,
            neck_trajectory_message: None,
        }
    }

    pub fn arm(&self, side: RobotSide) -> Option<&ArmTrajectory> {
        match side {
            RobotSide::Left => self.left_arm_trajectory_message.as_ref(),
            RobotSide::Right => self.right_arm_trajectory_message.as_ref(),
        }
    }

    pub fn populated_count(&self) -> usize {
        [
            self.left_arm_trajectory_message.is_some(),
            self.right_arm_trajectory_message.is_some(),
            self.chest_trajectory_message.is_some(),
            self.pelvis_trajectory_message.is_some(),
            self.neck_trajectory_message.is_some(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }

    /// Every queueing descriptor in the tree.
    pub fn queueing_properties(&self) -> Vec<&QueueingProperties> {
        let mut descriptors = Vec::new();

        for arm in [&self.left_arm_trajectory_message, &self.right_arm_trajectory_message]
            .into_iter()
            .flatten()
        {
            descriptors.push(&arm.jointspace_trajectory.queueing_properties);
        }
        if let Some(chest) = &self.chest_trajectory_message {
            descriptors.push(&chest.so3_trajectory.queueing_properties);
        }
        if let Some(pelvis) = &self.pelvis_trajectory_message {
            descriptors.push(&pelvis.se3_trajectory.queueing_properties);
        }
        if let Some(neck) = &self.neck_trajectory_message {
            descriptors.push(&neck.jointspace_trajectory.queueing_properties);
        }

        descriptors
    }
}
