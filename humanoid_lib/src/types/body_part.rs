use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Links of the humanoid that an upstream controller can claim control of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Pelvis,
    #[serde(alias = "chest")]
    Torso,
    LeftFoot,
    RightFoot,
    #[serde(alias = "left_hand")]
    LeftPalm,
    #[serde(alias = "right_hand")]
    RightPalm,
    #[serde(alias = "neck")]
    Head,
}

impl BodyPart {
    pub const ALL: [BodyPart; 7] = [
        BodyPart::Pelvis,
        BodyPart::Torso,
        BodyPart::LeftFoot,
        BodyPart::RightFoot,
        BodyPart::LeftPalm,
        BodyPart::RightPalm,
        BodyPart::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Pelvis => "pelvis",
            BodyPart::Torso => "torso",
            BodyPart::LeftFoot => "left_foot",
            BodyPart::RightFoot => "right_foot",
            BodyPart::LeftPalm => "left_palm",
            BodyPart::RightPalm => "right_palm",
            BodyPart::Head => "head",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pelvis" => Ok(BodyPart::Pelvis),
            "torso" | "chest" => Ok(BodyPart::Torso),
            "left_foot" => Ok(BodyPart::LeftFoot),
            "right_foot" => Ok(BodyPart::RightFoot),
            "left_palm" | "left_hand" => Ok(BodyPart::LeftPalm),
            "right_palm" | "right_hand" => Ok(BodyPart::RightPalm),
            "head" | "neck" => Ok(BodyPart::Head),
            other => Err(eyre::eyre!("Unknown body part identifier '{}'", other)),
        }
    }
}

/// Side selector shared by arm, hand and home commands.
/// Wire values follow the controller convention: left = 0, right = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotSide {
    Left,
    Right,
}

impl RobotSide {
    pub fn code(&self) -> u8 {
        match self {
            RobotSide::Left => 0,
            RobotSide::Right => 1,
        }
    }

    /// Palm link whose membership in the controlled set enables this arm.
    pub fn palm(&self) -> BodyPart {
        match self {
            RobotSide::Left => BodyPart::LeftPalm,
            RobotSide::Right => BodyPart::RightPalm,
        }
    }
}

/// Set of body parts currently driven by the upstream controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlledPartSet {
    parts: HashSet<BodyPart>,
}

impl ControlledPartSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        BodyPart::ALL.into_iter().collect()
    }

    /// Parses wire identifiers, returning the set and the identifiers that
    /// did not name a known body part.
    pub fn from_identifiers<I, S>(identifiers: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        let mut unknown = Vec::new();

        for id in identifiers {
            match id.as_ref().parse::<BodyPart>() {
                Ok(part) => {
                    set.insert(part);
                }
                Err(_) => unknown.push(id.as_ref().to_string()),
            }
        }

        (set, unknown)
    }

    pub fn contains(&self, part: BodyPart) -> bool {
        self.parts.contains(&part)
    }

    pub fn insert(&mut self, part: BodyPart) -> bool {
        self.parts.insert(part)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Members in a stable order, for logging.
    pub fn sorted(&self) -> Vec<BodyPart> {
        let mut parts: Vec<BodyPart> = self.parts.iter().copied().collect();
        parts.sort();
        parts
    }
}

impl FromIterator<BodyPart> for ControlledPartSet {
    fn from_iter<T: IntoIterator<Item = BodyPart>>(iter: T) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}
