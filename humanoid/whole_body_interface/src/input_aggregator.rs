use humanoid_lib::{
    assemble_configuration, BasePose, ControlledPartSet, JointPositions, OperatingMode,
    RobotConfiguration,
};
use tracing::debug;

/// Acceptance and arrival state of one input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Updates are dropped
    Closed,
    /// Accepting, nothing received yet
    Awaiting,
    /// Accepting, at least one update received
    Receiving,
    /// Received once and no longer accepting
    Latched,
}

impl InputState {
    pub fn is_accepting(&self) -> bool {
        matches!(self, InputState::Awaiting | InputState::Receiving)
    }

    pub fn is_received(&self) -> bool {
        matches!(self, InputState::Receiving | InputState::Latched)
    }
}

/// Holds the latest pose, joint vector and controlled parts, and decides when
/// a command can be composed from them.
#[derive(Debug, Clone)]
pub struct InputAggregator {
    latch_first: bool,
    pose: BasePose,
    joints: JointPositions,
    controlled_parts: ControlledPartSet,
    pose_state: InputState,
    joint_state: InputState,
    parts_state: InputState,
}

impl InputAggregator {
    pub fn new(mode: OperatingMode) -> Self {
        match mode {
            OperatingMode::ExternallyGated => Self {
                latch_first: false,
                pose: BasePose::identity(),
                joints: JointPositions::zeros(),
                controlled_parts: ControlledPartSet::empty(),
                pose_state: InputState::Closed,
                joint_state: InputState::Closed,
                parts_state: InputState::Closed,
            },
            // nothing gates a one-shot session, every part is assumed controlled
            OperatingMode::OneShot => Self {
                latch_first: true,
                pose: BasePose::identity(),
                joints: JointPositions::zeros(),
                controlled_parts: ControlledPartSet::all(),
                pose_state: InputState::Awaiting,
                joint_state: InputState::Awaiting,
                parts_state: InputState::Receiving,
            },
        }
    }

    fn after_accept(&self) -> InputState {
        if self.latch_first {
            InputState::Latched
        } else {
            InputState::Receiving
        }
    }

    /// Returns whether the update was taken.
    pub fn record_pose(&mut self, pose: BasePose) -> bool {
        if !self.pose_state.is_accepting() {
            debug!("Pose update dropped, input is {:?}", self.pose_state);
            return false;
        }

        self.pose = pose;
        self.pose_state = self.after_accept();
        true
    }

    /// Rebuilds the joint vector from a named joint state. Unknown names are
    /// ignored and unreported joints read zero.
    pub fn record_joint_positions(&mut self, names: &[String], values: &[f64]) -> bool {
        if !self.joint_state.is_accepting() {
            debug!("Joint update dropped, input is {:?}", self.joint_state);
            return false;
        }

        if names.len() != values.len() {
            debug!(
                "Joint update has {} names and {} values, pairing the first {}",
                names.len(),
                values.len(),
                names.len().min(values.len())
            );
        }

        let mapping = JointPositions::from_named(names, values);
        if !mapping.ignored.is_empty() {
            debug!("Ignoring unknown joints: {:?}", mapping.ignored);
        }

        self.joints = mapping.positions;
        self.joint_state = self.after_accept();
        true
    }

    /// Replaces the controlled set wholesale.
    pub fn record_controlled_parts<S: AsRef<str>>(&mut self, identifiers: &[S]) -> bool {
        if !self.parts_state.is_accepting() {
            debug!("Controlled parts update dropped, input is {:?}", self.parts_state);
            return false;
        }

        let (parts, unknown) = ControlledPartSet::from_identifiers(identifiers);
        if !unknown.is_empty() {
            debug!("Ignoring unknown body parts: {:?}", unknown);
        }

        self.controlled_parts = parts;
        self.parts_state = self.after_accept();
        true
    }

    pub fn is_ready(&self) -> bool {
        self.pose_state.is_received()
            && self.joint_state.is_received()
            && self.parts_state.is_received()
    }

    pub fn is_exhausted(&self) -> bool {
        !self.pose_state.is_accepting() && !self.joint_state.is_accepting()
    }

    /// Opens every input and forgets previous arrivals.
    pub fn rearm(&mut self) {
        self.pose_state = InputState::Awaiting;
        self.joint_state = InputState::Awaiting;
        self.parts_state = InputState::Awaiting;
    }

    /// Closes every input and forgets previous arrivals.
    pub fn close(&mut self) {
        self.pose_state = InputState::Closed;
        self.joint_state = InputState::Closed;
        self.parts_state = InputState::Closed;
    }

    /// Configuration snapshot, available once every input has arrived.
    pub fn configuration(&self) -> Option<RobotConfiguration> {
        self.is_ready()
            .then(|| assemble_configuration(&self.pose, &self.joints))
    }

    pub fn controlled_parts(&self) -> &ControlledPartSet {
        &self.controlled_parts
    }

    pub fn states(&self) -> (InputState, InputState, InputState) {
        (self.pose_state, self.joint_state, self.parts_state)
    }
}
