//! Hit group names

use std::fmt;

/// Body region reported with a hurt event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hitgroup {
    Generic,
    Head,
    Chest,
    Stomach,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Neck,
    Gear,
    Unknown,
}

impl Hitgroup {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Generic,
            1 => Self::Head,
            2 => Self::Chest,
            3 => Self::Stomach,
            4 => Self::LeftArm,
            5 => Self::RightArm,
            6 => Self::LeftLeg,
            7 => Self::RightLeg,
            8 => Self::Neck,
            10 => Self::Gear,
            _ => Self::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => "Body",
            Self::Head => "Head",
            Self::Chest => "Chest",
            Self::Stomach => "Stomach",
            Self::LeftArm => "Left Arm",
            Self::RightArm => "Right Arm",
            Self::LeftLeg => "Left Leg",
            Self::RightLeg => "Right Leg",
            Self::Neck => "Neck",
            Self::Gear => "Gear",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Hitgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
