use crate::BasePose;
use serde::{Deserialize, Serialize};

/// Pelvis pose update, world frame.
pub type PoseUpdate = BasePose;

/// Joint command in joint-state layout: parallel name/position arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JointStateUpdate {
    pub name: Vec<String>,
    pub position: Vec<f64>,
}

/// Identifiers of the links the upstream controller currently drives.
/// Kept as strings so one unknown identifier doesn't discard the whole update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlledPartsUpdate {
    pub parts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_payload() {
        let pose: PoseUpdate =
            serde_json::from_str(r#"{"position":[1.0,2.0,3.0],"orientation":[0.0,0.0,0.0,1.0]}"#)
                .unwrap();
        assert_eq!(pose.position, [1.0, 2.0, 3.0]);
        assert_eq!(pose.orientation, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_joint_state_payload() {
        let update: JointStateUpdate =
            serde_json::from_str(r#"{"name":["neckYaw"],"position":[0.25]}"#).unwrap();
        assert_eq!(update.name, vec!["neckYaw".to_string()]);
        assert_eq!(update.position, vec![0.25]);
    }

    #[test]
    fn test_controlled_parts_payload_is_a_plain_array() {
        let update: ControlledPartsUpdate =
            serde_json::from_str(r#"["pelvis","left_palm","wing"]"#).unwrap();
        assert_eq!(update.parts.len(), 3);
    }
}
