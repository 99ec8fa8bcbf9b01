//! Builds controller command trees from a configuration snapshot.
//!
//! Composition is deterministic apart from the creation timestamp stamped on
//! queueing descriptors, which is taken once per composed command.

use crate::{
    now_nanos, ArmTrajectory, BodyPart, ChestTrajectory, ControlledPartSet, ExecutionMode,
    FingerMotor, FrameInformation, GoHomeCommand, HandAction, HandFingerTrajectory, HandGesture,
    HomeTarget, JointSlot, JointspaceTrajectory, MessageParameters, NeckTrajectory,
    OneDoFJointTrajectory, PelvisTrajectory, Pose, PoseProvider, Quaternion, QueueingProperties,
    RobotConfiguration, RobotSide, Se3Trajectory, Se3TrajectoryPoint, SelectionMatrix3D,
    So3Trajectory, So3TrajectoryPoint, TrajectoryPoint1D, Vector3, WeightMatrix3D,
    WholeBodyTrajectory, LEFT_ARM_SLOTS, NECK_SLOTS, RIGHT_ARM_SLOTS,
};
use eyre::Result;
use tracing::debug;

/// Joint values for a slot list; zero-filled slots read 0.0.
pub fn select_joint_values(configuration: &RobotConfiguration, slots: &[JointSlot]) -> Vec<f64> {
    slots
        .iter()
        .map(|slot| slot.resolve(configuration.as_slice()))
        .collect()
}

/// Composes the whole-body trajectory for the controlled parts.
///
/// Arms and neck are sent in joint space, the chest as an orientation from
/// `poses`, the pelvis as the base pose taken straight from the
/// configuration. Feet and spine are never populated. An empty controlled set
/// yields a tree with no sub-commands.
pub fn compose_whole_body(
    configuration: &RobotConfiguration,
    controlled_parts: &ControlledPartSet,
    params: &MessageParameters,
    poses: &dyn PoseProvider,
) -> Result<WholeBodyTrajectory> {
    compose_whole_body_at(configuration, controlled_parts, params, poses, now_nanos())
}

/// Same as [`compose_whole_body`] with an explicit creation timestamp (ns).
pub fn compose_whole_body_at(
    configuration: &RobotConfiguration,
    controlled_parts: &ControlledPartSet,
    params: &MessageParameters,
    poses: &dyn PoseProvider,
    timestamp: i64,
) -> Result<WholeBodyTrajectory> {
    let builder = MessageBuilder { params, timestamp };
    let mut command = WholeBodyTrajectory::new(params.sequence_id);

    for side in [RobotSide::Left, RobotSide::Right] {
        if !controlled_parts.contains(side.palm()) {
            continue;
        }

        let (slots, message) = match side {
            RobotSide::Left => (&LEFT_ARM_SLOTS, &mut command.left_arm_trajectory_message),
            RobotSide::Right => (&RIGHT_ARM_SLOTS, &mut command.right_arm_trajectory_message),
        };
        let values = select_joint_values(configuration, slots);
        *message = Some(builder.arm(side, &values));
    }

    if controlled_parts.contains(BodyPart::Torso) {
        let chest = poses.pose_of(BodyPart::Torso, configuration)?;
        command.chest_trajectory_message = Some(builder.chest(chest.orientation));
    }

    if controlled_parts.contains(BodyPart::Pelvis) {
        command.pelvis_trajectory_message = Some(builder.pelvis(
            Vector3::from_array(configuration.base_position()),
            Quaternion::from_array(configuration.base_orientation()),
        ));
    }

    if controlled_parts.contains(BodyPart::Head) {
        let values = select_joint_values(configuration, &NECK_SLOTS);
        command.neck_trajectory_message = Some(builder.neck(&values));
    }

    debug!(
        "Composed whole-body trajectory with {} sub-commands for {:?}",
        command.populated_count(),
        controlled_parts.sorted()
    );

    Ok(command)
}

pub fn compose_go_home(target: HomeTarget, params: &MessageParameters) -> GoHomeCommand {
    GoHomeCommand {
        humanoid_body_part: target.body_part(),
        robot_side: target.side(),
        trajectory_time: params.go_home.trajectory_time,
    }
}

/// Drives all six finger motors of one hand to the open or close position.
pub fn compose_hand_finger_trajectory(
    gesture: HandGesture,
    params: &MessageParameters,
) -> HandFingerTrajectory {
    let mut params = params.clone().for_finger_messages();
    let fingers = &params.finger_trajectory;
    let (motor_position, time) = match gesture.action {
        HandAction::Open => (fingers.open_motor_position, fingers.open_hand_time),
        HandAction::Close => (fingers.close_motor_position, fingers.close_hand_time),
    };
    params.trajectory_point.time = time;

    let builder = MessageBuilder {
        params: &params,
        timestamp: now_nanos(),
    };
    let positions = vec![motor_position; FingerMotor::ALL.len()];

    HandFingerTrajectory {
        sequence_id: params.sequence_id,
        robot_side: gesture.side,
        finger_motor_names: FingerMotor::ALL.to_vec(),
        jointspace_trajectory: builder.jointspace(&positions),
    }
}

struct MessageBuilder<'a> {
    params: &'a MessageParameters,
    timestamp: i64,
}

impl MessageBuilder<'_> {
    fn queueing_properties(&self) -> QueueingProperties {
        let queueable = &self.params.queueable;
        let mode = queueable.execution_mode;

        QueueingProperties {
            sequence_id: self.params.sequence_id,
            execution_mode: mode,
            message_id: queueable.message_id,
            previous_message_id: (mode == ExecutionMode::Queue)
                .then_some(queueable.previous_message_id),
            stream_integration_duration: (mode == ExecutionMode::Stream)
                .then_some(queueable.stream_integration_duration),
            timestamp: self.timestamp,
        }
    }

    fn frame_information(&self, trajectory_frame: i64, data_frame: i64) -> FrameInformation {
        FrameInformation {
            sequence_id: self.params.sequence_id,
            trajectory_reference_frame_id: trajectory_frame,
            data_reference_frame_id: data_frame,
        }
    }

    fn selection_matrix(&self) -> SelectionMatrix3D {
        let selection = &self.params.selection_matrix;
        SelectionMatrix3D {
            sequence_id: self.params.sequence_id,
            selection_frame_id: selection.selection_frame_id,
            x_selected: selection.x_selected,
            y_selected: selection.y_selected,
            z_selected: selection.z_selected,
        }
    }

    fn weight_matrix(&self) -> WeightMatrix3D {
        let weights = &self.params.weight_matrix;
        WeightMatrix3D {
            sequence_id: self.params.sequence_id,
            weight_frame_id: weights.weight_frame_id,
            x_weight: weights.x_weight,
            y_weight: weights.y_weight,
            z_weight: weights.z_weight,
        }
    }

    fn one_dof_joint(&self, position: f64) -> OneDoFJointTrajectory {
        OneDoFJointTrajectory {
            sequence_id: self.params.sequence_id,
            weight: self.params.one_dof_joint.weight,
            trajectory_points: vec![TrajectoryPoint1D {
                sequence_id: self.params.sequence_id,
                time: self.params.trajectory_point.time,
                position,
                velocity: 0.0,
            }],
        }
    }

    fn jointspace(&self, positions: &[f64]) -> JointspaceTrajectory {
        JointspaceTrajectory {
            sequence_id: self.params.sequence_id,
            queueing_properties: self.queueing_properties(),
            joint_trajectory_messages: positions
                .iter()
                .map(|&position| self.one_dof_joint(position))
                .collect(),
        }
    }

    fn so3(&self, orientation: Quaternion, trajectory_frame: i64, data_frame: i64) -> So3Trajectory {
        So3Trajectory {
            sequence_id: self.params.sequence_id,
            use_custom_control_frame: self.params.se3_so3.use_custom_control_frame,
            control_frame_pose: Pose::zero(),
            queueing_properties: self.queueing_properties(),
            frame_information: self.frame_information(trajectory_frame, data_frame),
            selection_matrix: self.selection_matrix(),
            weight_matrix: self.weight_matrix(),
            taskspace_trajectory_points: vec![So3TrajectoryPoint {
                sequence_id: self.params.sequence_id,
                time: self.params.trajectory_point.time,
                orientation,
                angular_velocity: Vector3::zero(),
            }],
        }
    }

    fn se3(
        &self,
        position: Vector3,
        orientation: Quaternion,
        trajectory_frame: i64,
        data_frame: i64,
    ) -> Se3Trajectory {
        Se3Trajectory {
            sequence_id: self.params.sequence_id,
            use_custom_control_frame: self.params.se3_so3.use_custom_control_frame,
            control_frame_pose: Pose::zero(),
            queueing_properties: self.queueing_properties(),
            frame_information: self.frame_information(trajectory_frame, data_frame),
            angular_selection_matrix: self.selection_matrix(),
            linear_selection_matrix: self.selection_matrix(),
            angular_weight_matrix: self.weight_matrix(),
            linear_weight_matrix: self.weight_matrix(),
            taskspace_trajectory_points: vec![Se3TrajectoryPoint {
                sequence_id: self.params.sequence_id,
                time: self.params.trajectory_point.time,
                position,
                orientation,
                linear_velocity: Vector3::zero(),
                angular_velocity: Vector3::zero(),
            }],
        }
    }

    fn arm(&self, side: RobotSide, positions: &[f64]) -> ArmTrajectory {
        ArmTrajectory {
            sequence_id: self.params.sequence_id,
            robot_side: side,
            force_execution: self.params.arm.force_execution,
            jointspace_trajectory: self.jointspace(positions),
        }
    }

    fn neck(&self, positions: &[f64]) -> NeckTrajectory {
        NeckTrajectory {
            sequence_id: self.params.sequence_id,
            jointspace_trajectory: self.jointspace(positions),
        }
    }

    // chest orientation is expressed in pelvis z-up, data in world
    fn chest(&self, orientation: Quaternion) -> ChestTrajectory {
        let frames = &self.params.frame;
        ChestTrajectory {
            sequence_id: self.params.sequence_id,
            so3_trajectory: self.so3(
                orientation,
                frames.trajectory_reference_frame_id_pelvis_zup,
                frames.data_reference_frame_id_world,
            ),
        }
    }

    fn pelvis(&self, position: Vector3, orientation: Quaternion) -> PelvisTrajectory {
        let frames = &self.params.frame;
        let pelvis = &self.params.pelvis;
        PelvisTrajectory {
            sequence_id: self.params.sequence_id,
            force_execution: pelvis.force_execution,
            enable_user_pelvis_control: pelvis.enable_user_pelvis_control,
            enable_user_pelvis_control_during_walking: pelvis
                .enable_user_pelvis_control_during_walking,
            se3_trajectory: self.se3(
                position,
                orientation,
                frames.trajectory_reference_frame_id_world,
                frames.data_reference_frame_id_world,
            ),
        }
    }
}
