use serde::{Deserialize, Serialize};

/// How the controller treats a new message relative to the one in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Override,
    Queue,
    Stream,
}

impl ExecutionMode {
    /// Wire code: 0 override, 1 queue, 2 stream.
    pub fn code(&self) -> u8 {
        match self {
            ExecutionMode::Override => 0,
            ExecutionMode::Queue => 1,
            ExecutionMode::Stream => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmParams {
    /// Bypasses the controller check that restricts upper-body motion while walking
    pub force_execution: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameParams {
    pub trajectory_reference_frame_id_world: i64,
    pub data_reference_frame_id_world: i64,
    pub trajectory_reference_frame_id_pelvis_zup: i64,
    pub data_reference_frame_id_pelvis_zup: i64,
}

pub const WORLD_FRAME_ID: i64 = 83766130;
pub const PELVIS_ZUP_FRAME_ID: i64 = -101;

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            trajectory_reference_frame_id_world: WORLD_FRAME_ID,
            data_reference_frame_id_world: WORLD_FRAME_ID,
            trajectory_reference_frame_id_pelvis_zup: PELVIS_ZUP_FRAME_ID,
            data_reference_frame_id_pelvis_zup: PELVIS_ZUP_FRAME_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneDofJointParams {
    /// Negative weight lets the controller pick its own default
    pub weight: f64,
}

impl Default for OneDofJointParams {
    fn default() -> Self {
        Self { weight: -1.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PelvisParams {
    pub force_execution: bool,
    /// Track the pelvis target regardless of leg kinematics
    pub enable_user_pelvis_control: bool,
    pub enable_user_pelvis_control_during_walking: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueableParams {
    pub execution_mode: ExecutionMode,
    pub message_id: i64,
    /// Linkage to the message this one queues behind; only sent in queue mode
    pub previous_message_id: i64,
    /// Seconds; only sent in stream mode
    pub stream_integration_duration: f64,
}

impl Default for QueueableParams {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Override,
            message_id: -1,
            previous_message_id: -1,
            stream_integration_duration: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Se3So3Params {
    pub use_custom_control_frame: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionMatrixParams {
    pub selection_frame_id: i64,
    pub x_selected: bool,
    pub y_selected: bool,
    pub z_selected: bool,
}

impl Default for SelectionMatrixParams {
    fn default() -> Self {
        Self {
            selection_frame_id: 0,
            x_selected: true,
            y_selected: true,
            z_selected: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightMatrixParams {
    pub weight_frame_id: i64,
    pub x_weight: f64,
    pub y_weight: f64,
    pub z_weight: f64,
}

impl Default for WeightMatrixParams {
    fn default() -> Self {
        Self {
            weight_frame_id: 0,
            x_weight: -1.0,
            y_weight: -1.0,
            z_weight: -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryPointParams {
    /// Seconds from trajectory start at which the point is reached
    pub time: f64,
}

impl Default for TrajectoryPointParams {
    fn default() -> Self {
        Self { time: 5.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoHomeParams {
    pub trajectory_time: f64,
}

impl Default for GoHomeParams {
    fn default() -> Self {
        Self {
            trajectory_time: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerTrajectoryParams {
    pub open_motor_position: f64,
    pub close_motor_position: f64,
    pub open_hand_time: f64,
    pub close_hand_time: f64,
}

impl Default for FingerTrajectoryParams {
    fn default() -> Self {
        Self {
            open_motor_position: 0.0,
            close_motor_position: 1.0,
            open_hand_time: 6.0,
            close_hand_time: 4.0,
        }
    }
}

/// Everything the composer needs besides the configuration and the
/// controlled parts. Built fresh for every composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageParameters {
    pub sequence_id: i64,
    pub arm: ArmParams,
    pub frame: FrameParams,
    pub one_dof_joint: OneDofJointParams,
    pub pelvis: PelvisParams,
    pub queueable: QueueableParams,
    pub se3_so3: Se3So3Params,
    pub selection_matrix: SelectionMatrixParams,
    pub weight_matrix: WeightMatrixParams,
    pub trajectory_point: TrajectoryPointParams,
    pub go_home: GoHomeParams,
    pub finger_trajectory: FingerTrajectoryParams,
}

impl Default for MessageParameters {
    fn default() -> Self {
        Self {
            sequence_id: 1,
            arm: ArmParams::default(),
            frame: FrameParams::default(),
            one_dof_joint: OneDofJointParams::default(),
            pelvis: PelvisParams::default(),
            queueable: QueueableParams::default(),
            se3_so3: Se3So3Params::default(),
            selection_matrix: SelectionMatrixParams::default(),
            weight_matrix: WeightMatrixParams::default(),
            trajectory_point: TrajectoryPointParams::default(),
            go_home: GoHomeParams::default(),
            finger_trajectory: FingerTrajectoryParams::default(),
        }
    }
}

impl MessageParameters {
    /// Streaming: each message supersedes the last, points are reached immediately.
    pub fn streaming(mut self, integration_duration: f64) -> Self {
        self.queueable.execution_mode = ExecutionMode::Stream;
        self.queueable.stream_integration_duration = integration_duration;
        self.trajectory_point.time = 0.0;
        self
    }

    pub fn queued(mut self, message_id: i64, previous_message_id: i64) -> Self {
        self.queueable.execution_mode = ExecutionMode::Queue;
        self.queueable.message_id = message_id;
        self.queueable.previous_message_id = previous_message_id;
        self
    }

    /// Finger messages mirror what the vendor teleop panel sends.
    pub fn for_finger_messages(mut self) -> Self {
        self.sequence_id = 2;
        self.queueable.execution_mode = ExecutionMode::Override;
        self.queueable.message_id = 2;
        self.queueable.previous_message_id = 0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = MessageParameters::default();
        assert_eq!(params.sequence_id, 1);
        assert_eq!(params.queueable.execution_mode, ExecutionMode::Override);
        assert_eq!(params.queueable.message_id, -1);
        assert_eq!(params.trajectory_point.time, 5.0);
        assert_eq!(params.go_home.trajectory_time, 3.0);
        assert_eq!(params.frame.trajectory_reference_frame_id_world, WORLD_FRAME_ID);
        assert_eq!(params.frame.trajectory_reference_frame_id_pelvis_zup, PELVIS_ZUP_FRAME_ID);
    }

    #[test]
    fn test_streaming_overrides() {
        let params = MessageParameters::default().streaming(0.13);
        assert_eq!(params.queueable.execution_mode, ExecutionMode::Stream);
        assert_eq!(params.queueable.stream_integration_duration, 0.13);
        assert_eq!(params.trajectory_point.time, 0.0);
    }

    #[test]
    fn test_execution_mode_codes() {
        assert_eq!(ExecutionMode::Override.code(), 0);
        assert_eq!(ExecutionMode::Queue.code(), 1);
        assert_eq!(ExecutionMode::Stream.code(), 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let params: MessageParameters = toml::from_str(
            r#"
            sequence_id = 7

            [weight_matrix]
            x_weight = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(params.sequence_id, 7);
        assert_eq!(params.weight_matrix.x_weight, 10.0);
        assert_eq!(params.weight_matrix.y_weight, -1.0);
        assert_eq!(params.trajectory_point.time, 5.0);
    }
}
