use dora_node_api::arrow::array::{Array, BinaryArray};
use dora_node_api::{dora_core::config::DataId, DoraNode, Event};
use eyre::Result;
use humanoid_lib::{
    init_tracing, ChainKinematics, CommandWithMetadata, ControlledPartsUpdate, InterfaceConfig,
    JointStateUpdate, OperatingMode, PoseUpdate,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, warn};

mod control_mode;
mod input_aggregator;
mod request_queue;
mod session;

use control_mode::decode_status;
use session::Session;

fn main() -> Result<(), Box<dyn Error>> {
    let _guard = init_tracing();

    info!("Starting whole-body interface node");

    let config = InterfaceConfig::from_env()?;
    let kinematics = ChainKinematics::new(&config.kinematics)?;
    let shutdown_delay = Duration::from_secs_f64(config.session.shutdown_delay_secs);

    match config.session.mode {
        OperatingMode::ExternallyGated => {
            info!("Waiting for controller status...");
        }
        OperatingMode::OneShot => {
            info!("Waiting for pose and joint commands...");
        }
    }

    let mut session = Session::new(&config, Box::new(kinematics));

    let (mut node, mut events) = DoraNode::init_from_env()?;
    let whole_body_output = DataId::from("whole_body_trajectory".to_owned());
    let go_home_output = DataId::from("go_home".to_owned());
    let hand_output = DataId::from("hand_finger_trajectory".to_owned());

    while let Some(event) = events.recv() {
        match event {
            Event::Input { id, data, metadata: _ } => match id.as_str() {
                "pelvis_pose" => {
                    if let Some(pose) = decode_json::<PoseUpdate>(&**data, "pelvis_pose") {
                        session.on_pose(pose);
                    }
                }
                "joint_command" => {
                    if let Some(update) = decode_json::<JointStateUpdate>(&**data, "joint_command") {
                        session.on_joint_state(&update);
                    }
                }
                "controlled_parts" => {
                    if let Some(update) =
                        decode_json::<ControlledPartsUpdate>(&**data, "controlled_parts")
                    {
                        session.on_controlled_parts(&update);
                    }
                }
                "status" => {
                    let Some(bytes) = first_bytes(&**data) else {
                        continue;
                    };
                    match decode_status(bytes) {
                        Ok(token) => {
                            session.on_status(&token);
                            info!("Status {} ({:?})", token, session.listening_state());
                        }
                        Err(e) => warn!("Failed to decode status: {}", e),
                    }
                }
                "tick" => {
                    let output = session.tick();

                    if let Some(command) = output.whole_body {
                        send_command(&mut node, &whole_body_output, command);
                    }
                    for command in output.go_home {
                        info!("Publishing go home message for {:?}", command.target());
                        send_command(&mut node, &go_home_output, command);
                    }
                    for command in output.hand_finger {
                        send_command(&mut node, &hand_output, command);
                    }

                    if output.shutdown {
                        info!(
                            "Published whole-body command, exiting in {:.1}s",
                            shutdown_delay.as_secs_f64()
                        );
                        std::thread::sleep(shutdown_delay);
                        break;
                    }
                }
                other => {
                    warn!("Unexpected input: {}", other);
                }
            },
            Event::InputClosed { id } => {
                info!("Input {} closed", id);
            }
            Event::Stop(_) => {
                info!("Received stop event");
                break;
            }
            other => {
                debug!("Unhandled event: {:?}", other);
            }
        }
    }

    info!("Whole-body interface node finished");
    Ok(())
}

fn first_bytes(data: &dyn Array) -> Option<&[u8]> {
    let array = data.as_any().downcast_ref::<BinaryArray>()?;
    if array.is_empty() {
        return None;
    }
    Some(array.value(0))
}

fn decode_json<T: DeserializeOwned>(data: &dyn Array, input: &str) -> Option<T> {
    let bytes = first_bytes(data)?;
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to deserialize {}: {}", input, e);
            None
        }
    }
}

/// Delivery failures are logged and not retried.
fn send_command<T: Serialize>(node: &mut DoraNode, output: &DataId, command: T) {
    let envelope = CommandWithMetadata::new(command);

    let serialized = match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to serialize {}: {}", output, e);
            return;
        }
    };

    let arrow_data = BinaryArray::from_vec(vec![serialized.as_slice()]);
    if let Err(e) = node.send_output(output.clone(), Default::default(), arrow_data) {
        warn!("Failed to send {}: {}", output, e);
    }
}
