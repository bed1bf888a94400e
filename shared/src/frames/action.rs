use std::fmt;

/// The action a frame carries.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Spawn = 1,
    Despawn = 2,
    Change = 3,
    Invoke = 4,
}

impl ActionKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(ActionKind::Spawn),
            2 => Some(ActionKind::Despawn),
            3 => Some(ActionKind::Change),
            4 => Some(ActionKind::Invoke),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Spawn => "Spawn",
            ActionKind::Despawn => "Despawn",
            ActionKind::Change => "Change",
            ActionKind::Invoke => "Invoke",
        };
        f.write_str(name)
    }
}
