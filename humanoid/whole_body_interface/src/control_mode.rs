use crate::input_aggregator::InputAggregator;
use crate::request_queue::{HandRequestQueue, HomeRequestQueue};
use eyre::Result;
use humanoid_lib::{HandAction, HandGesture, HomeTarget, OperatingMode, RobotSide};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListeningState {
    AwaitingStart,
    Listening,
    Stopped,
}

/// Controller status tokens. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSignal {
    StartListening,
    StopListening,
    Home(HomeTarget),
    Hand(HandGesture),
}

impl FromStr for StatusSignal {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let signal = match s {
            "START-LISTENING" => StatusSignal::StartListening,
            "STOP-LISTENING" => StatusSignal::StopListening,
            "HOME-LEFTARM" => StatusSignal::Home(HomeTarget::LeftArm),
            "HOME-RIGHTARM" => StatusSignal::Home(HomeTarget::RightArm),
            "HOME-CHEST" => StatusSignal::Home(HomeTarget::Chest),
            "HOME-PELVIS" => StatusSignal::Home(HomeTarget::Pelvis),
            "OPEN-LEFTHAND" => hand(RobotSide::Left, HandAction::Open),
            "CLOSE-LEFTHAND" => hand(RobotSide::Left, HandAction::Close),
            "OPEN-RIGHTHAND" => hand(RobotSide::Right, HandAction::Open),
            "CLOSE-RIGHTHAND" => hand(RobotSide::Right, HandAction::Close),
            other => return Err(eyre::eyre!("Unrecognized status '{}'", other)),
        };
        Ok(signal)
    }
}

fn hand(side: RobotSide, action: HandAction) -> StatusSignal {
    StatusSignal::Hand(HandGesture::new(side, action))
}

impl fmt::Display for StatusSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            StatusSignal::StartListening => "START-LISTENING",
            StatusSignal::StopListening => "STOP-LISTENING",
            StatusSignal::Home(HomeTarget::LeftArm) => "HOME-LEFTARM",
            StatusSignal::Home(HomeTarget::RightArm) => "HOME-RIGHTARM",
            StatusSignal::Home(HomeTarget::Chest) => "HOME-CHEST",
            StatusSignal::Home(HomeTarget::Pelvis) => "HOME-PELVIS",
            StatusSignal::Hand(gesture) => match (gesture.side, gesture.action) {
                (RobotSide::Left, HandAction::Open) => "OPEN-LEFTHAND",
                (RobotSide::Left, HandAction::Close) => "CLOSE-LEFTHAND",
                (RobotSide::Right, HandAction::Open) => "OPEN-RIGHTHAND",
                (RobotSide::Right, HandAction::Close) => "CLOSE-RIGHTHAND",
            },
        };
        write!(f, "{}", token)
    }
}

/// Status payloads arrive either JSON-encoded or as the bare token.
pub fn decode_status(bytes: &[u8]) -> Result<String> {
    if let Ok(token) = serde_json::from_slice::<String>(bytes) {
        return Ok(token);
    }

    let raw = std::str::from_utf8(bytes)
        .map_err(|e| eyre::eyre!("Status payload is not UTF-8: {}", e))?;
    Ok(raw.trim().to_string())
}

/// Listening state driven by controller status signals.
#[derive(Debug, Clone)]
pub struct ControlModeStateMachine {
    mode: OperatingMode,
    state: ListeningState,
}

impl ControlModeStateMachine {
    pub fn new(mode: OperatingMode) -> Self {
        let state = match mode {
            OperatingMode::ExternallyGated => ListeningState::AwaitingStart,
            OperatingMode::OneShot => ListeningState::Listening,
        };
        Self { mode, state }
    }

    pub fn state(&self) -> ListeningState {
        self.state
    }

    /// Parses and applies a raw token. Unknown tokens only log a warning.
    pub fn handle_token(
        &mut self,
        token: &str,
        inputs: &mut InputAggregator,
        homes: &mut HomeRequestQueue,
        hands: &mut HandRequestQueue,
    ) {
        match token.parse::<StatusSignal>() {
            Ok(signal) => self.apply(signal, inputs, homes, hands),
            Err(e) => warn!("{}, ignoring status message", e),
        }
    }

    pub fn apply(
        &mut self,
        signal: StatusSignal,
        inputs: &mut InputAggregator,
        homes: &mut HomeRequestQueue,
        hands: &mut HandRequestQueue,
    ) {
        match signal {
            StatusSignal::StartListening => {
                inputs.rearm();
                self.state = ListeningState::Listening;
                info!("Listening for controller commands");
            }
            StatusSignal::StopListening => {
                inputs.close();
                if self.state != ListeningState::Stopped {
                    info!("Stopped listening for controller commands");
                }
                self.state = ListeningState::Stopped;
            }
            StatusSignal::Home(target) => {
                if homes.enqueue(target) {
                    info!("Homing {:?}, {} request(s) pending", target, homes.len());
                }
            }
            StatusSignal::Hand(gesture) => {
                if hands.enqueue(gesture) {
                    info!(
                        "{:?} {:?} hand, {} request(s) pending",
                        gesture.action,
                        gesture.side,
                        hands.len()
                    );
                }
            }
        }
    }

    /// One-shot sessions end once their command went out and the inputs
    /// stopped accepting; gated sessions run until the dataflow stops them.
    pub fn should_terminate(&self, inputs: &InputAggregator, emitted: bool) -> bool {
        self.mode == OperatingMode::OneShot && emitted && inputs.is_exhausted()
    }
}
