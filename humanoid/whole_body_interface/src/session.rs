use crate::control_mode::{ControlModeStateMachine, ListeningState};
use crate::input_aggregator::InputAggregator;
use crate::request_queue::{HandRequestQueue, HomeRequestQueue};
use humanoid_lib::{
    compose_go_home, compose_hand_finger_trajectory, compose_whole_body, ControlledPartsUpdate,
    GoHomeCommand, HandFingerTrajectory, InterfaceConfig, JointStateUpdate, MessageParameters,
    OperatingMode, PoseProvider, PoseUpdate, WholeBodyTrajectory,
};
use tracing::{debug, info, warn};

/// Everything a single tick wants sent, plus whether the node should exit.
#[derive(Debug, Default)]
pub struct TickOutput {
    pub whole_body: Option<WholeBodyTrajectory>,
    pub go_home: Vec<GoHomeCommand>,
    pub hand_finger: Vec<HandFingerTrajectory>,
    pub shutdown: bool,
}

/// Single owner of the interface state. Input events and ticks are applied
/// one at a time by the event loop.
pub struct Session {
    mode: OperatingMode,
    params: MessageParameters,
    poses: Box<dyn PoseProvider>,
    inputs: InputAggregator,
    control: ControlModeStateMachine,
    homes: HomeRequestQueue,
    hands: HandRequestQueue,
    emitted: bool,
    streaming: bool,
}

impl Session {
    pub fn new(config: &InterfaceConfig, poses: Box<dyn PoseProvider>) -> Self {
        let mode = config.session.mode;
        Self {
            mode,
            params: config.message_parameters(),
            poses,
            inputs: InputAggregator::new(mode),
            control: ControlModeStateMachine::new(mode),
            homes: HomeRequestQueue::new(),
            hands: HandRequestQueue::new(),
            emitted: false,
            streaming: false,
        }
    }

    pub fn listening_state(&self) -> ListeningState {
        self.control.state()
    }

    pub fn on_pose(&mut self, pose: PoseUpdate) {
        self.inputs.record_pose(pose);
    }

    pub fn on_joint_state(&mut self, update: &JointStateUpdate) {
        self.inputs
            .record_joint_positions(&update.name, &update.position);
    }

    pub fn on_controlled_parts(&mut self, update: &ControlledPartsUpdate) {
        self.inputs.record_controlled_parts(update.parts.as_slice());
    }

    pub fn on_status(&mut self, token: &str) {
        self.control
            .handle_token(token, &mut self.inputs, &mut self.homes, &mut self.hands);
        debug!(
            "Status {} -> {:?}, inputs {:?}",
            token,
            self.control.state(),
            self.inputs.states()
        );
    }

    pub fn tick(&mut self) -> TickOutput {
        let mut output = TickOutput {
            go_home: self
                .homes
                .drain()
                .into_iter()
                .map(|target| compose_go_home(target, &self.params))
                .collect(),
            hand_finger: self
                .hands
                .drain()
                .into_iter()
                .map(|gesture| compose_hand_finger_trajectory(gesture, &self.params))
                .collect(),
            ..Default::default()
        };

        match self.mode {
            OperatingMode::ExternallyGated => {
                output.whole_body = self.compose_if_ready();
                self.log_streaming(output.whole_body.is_some());
            }
            OperatingMode::OneShot => {
                if !self.emitted && self.inputs.is_exhausted() {
                    output.whole_body = self.compose_if_ready();
                    self.emitted = output.whole_body.is_some();
                    if self.emitted {
                        info!("Composed single whole-body command");
                    }
                }
            }
        }

        output.shutdown = self.control.should_terminate(&self.inputs, self.emitted);
        output
    }

    fn compose_if_ready(&self) -> Option<WholeBodyTrajectory> {
        let configuration = self.inputs.configuration()?;

        match compose_whole_body(
            &configuration,
            self.inputs.controlled_parts(),
            &self.params,
            self.poses.as_ref(),
        ) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!("Skipping whole-body command: {}", e);
                None
            }
        }
    }

    fn log_streaming(&mut self, streaming: bool) {
        if streaming != self.streaming {
            if streaming {
                info!("Streaming whole-body commands");
            } else {
                info!("Whole-body stream paused");
            }
        }
        self.streaming = streaming;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use humanoid_lib::{
        BasePose, BodyPart, ExecutionMode, HomeTarget, Pose, RobotConfiguration, RobotSide,
    };

    struct IdentityPoses;

    impl PoseProvider for IdentityPoses {
        fn pose_of(&self, _part: BodyPart, configuration: &RobotConfiguration) -> eyre::Result<Pose> {
            Ok(configuration.base_pose().to_pose())
        }
    }

    struct FailingPoses;

    impl PoseProvider for FailingPoses {
        fn pose_of(&self, part: BodyPart, _configuration: &RobotConfiguration) -> eyre::Result<Pose> {
            Err(eyre::eyre!("no model for {}", part))
        }
    }

    fn session(mode: OperatingMode) -> Session {
        let mut config = InterfaceConfig::default();
        config.session.mode = mode;
        Session::new(&config, Box::new(IdentityPoses))
    }

    fn pose() -> PoseUpdate {
        BasePose {
            position: [1.0, 2.0, 3.0],
            orientation: [0.0, 0.0, 0.0, 1.0],
        }
    }

    fn joints() -> JointStateUpdate {
        JointStateUpdate {
            name: vec!["leftShoulderPitch".to_string(), "neckYaw".to_string()],
            position: vec![0.3, 0.1],
        }
    }

    fn parts(list: &[&str]) -> ControlledPartsUpdate {
        ControlledPartsUpdate {
            parts: list.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn feed(session: &mut Session, controlled: &[&str]) {
        session.on_pose(pose());
        session.on_joint_state(&joints());
        session.on_controlled_parts(&parts(controlled));
    }

    #[test]
    fn test_gated_session_waits_for_start() {
        let mut session = session(OperatingMode::ExternallyGated);
        feed(&mut session, &["pelvis"]);

        let output = session.tick();
        assert!(output.whole_body.is_none());
        assert!(!output.shutdown);
        assert_eq!(session.listening_state(), ListeningState::AwaitingStart);
    }

    #[test]
    fn test_gated_session_streams_every_tick_while_ready() {
        let mut session = session(OperatingMode::ExternallyGated);
        session.on_status("START-LISTENING");
        feed(&mut session, &["pelvis", "left_palm"]);

        for _ in 0..3 {
            let output = session.tick();
            let command = output.whole_body.unwrap();
            assert_eq!(command.populated_count(), 2);
            for descriptor in command.queueing_properties() {
                assert_eq!(descriptor.execution_mode, ExecutionMode::Stream);
                assert_eq!(descriptor.stream_integration_duration, Some(0.13));
            }
            assert!(!output.shutdown);
        }
    }

    #[test]
    fn test_stop_listening_pauses_stream_without_shutdown() {
        let mut session = session(OperatingMode::ExternallyGated);
        session.on_status("START-LISTENING");
        feed(&mut session, &["pelvis"]);
        assert!(session.tick().whole_body.is_some());

        session.on_status("STOP-LISTENING");
        feed(&mut session, &["pelvis"]);
        let output = session.tick();
        assert!(output.whole_body.is_none());
        assert!(!output.shutdown);

        session.on_status("START-LISTENING");
        feed(&mut session, &["pelvis"]);
        assert!(session.tick().whole_body.is_some());
    }

    #[test]
    fn test_home_requests_drain_once() {
        let mut session = session(OperatingMode::ExternallyGated);
        session.on_status("HOME-LEFTARM");

        let output = session.tick();
        assert_eq!(output.go_home.len(), 1);
        assert_eq!(output.go_home[0].target(), HomeTarget::LeftArm);
        assert_eq!(output.go_home[0].trajectory_time, 3.0);

        assert!(session.tick().go_home.is_empty());
    }

    #[test]
    fn test_hand_requests_drain_once() {
        let mut session = session(OperatingMode::ExternallyGated);
        session.on_status("OPEN-RIGHTHAND");
        session.on_status("OPEN-RIGHTHAND");

        let output = session.tick();
        assert_eq!(output.hand_finger.len(), 1);
        assert_eq!(output.hand_finger[0].robot_side, RobotSide::Right);
        assert_eq!(
            output.hand_finger[0].jointspace_trajectory.positions(),
            vec![0.0; 6]
        );
        assert!(session.tick().hand_finger.is_empty());

        session.on_status("CLOSE-RIGHTHAND");
        let closed = session.tick().hand_finger;
        assert_eq!(closed.len(), 1);
        assert_eq!(
            closed[0].jointspace_trajectory.positions(),
            vec![1.0; 6]
        );
    }

    #[test]
    fn test_one_shot_emits_once_then_shuts_down() {
        let mut session = session(OperatingMode::OneShot);
        assert_eq!(session.listening_state(), ListeningState::Listening);

        session.on_pose(pose());
        let waiting = session.tick();
        assert!(waiting.whole_body.is_none());
        assert!(!waiting.shutdown);

        session.on_joint_state(&joints());
        let output = session.tick();
        let command = output.whole_body.unwrap();
        assert!(output.shutdown);

        assert_eq!(command.populated_count(), 5);
        for descriptor in command.queueing_properties() {
            assert_eq!(descriptor.execution_mode, ExecutionMode::Override);
        }
        let left = command.arm(RobotSide::Left).unwrap();
        assert_eq!(left.jointspace_trajectory.positions()[0], 0.3);

        let again = session.tick();
        assert!(again.whole_body.is_none());
        assert!(again.shutdown);
    }

    #[test]
    fn test_one_shot_ignores_later_updates() {
        let mut session = session(OperatingMode::OneShot);
        session.on_pose(pose());
        session.on_pose(BasePose::identity());
        session.on_joint_state(&joints());

        let command = session.tick().whole_body.unwrap();
        let pelvis = command.pelvis_trajectory_message.unwrap();
        assert_eq!(
            pelvis.se3_trajectory.taskspace_trajectory_points[0].position.x,
            1.0
        );
    }

    #[test]
    fn test_kinematics_failure_skips_cycle() {
        let mut config = InterfaceConfig::default();
        config.session.mode = OperatingMode::ExternallyGated;
        let mut session = Session::new(&config, Box::new(FailingPoses));

        session.on_status("START-LISTENING");
        feed(&mut session, &["chest"]);
        session.on_status("HOME-CHEST");

        let output = session.tick();
        assert!(output.whole_body.is_none());
        assert_eq!(output.go_home.len(), 1);
        assert!(!output.shutdown);
    }
}
