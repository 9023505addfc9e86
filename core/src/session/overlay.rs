/// Which detector, if any, the edit overlay is bound to.
///
/// `creating` is set while a create-detector call for the bound entry is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Idle,
    Editing { index: usize, creating: bool },
    Adding { index: usize, creating: bool },
}

impl Overlay {
    pub fn editing(index: usize) -> Self {
        Self::Editing {
            index,
            creating: false,
        }
    }

    pub fn adding(index: usize) -> Self {
        Self::Adding {
            index,
            creating: false,
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Editing { index, .. } | Self::Adding { index, .. } => Some(index),
        }
    }

    pub fn is_open(self) -> bool {
        self != Self::Idle
    }

    /// True when closing without saving must roll the entry back out of the list.
    pub fn was_add(self) -> bool {
        matches!(self, Self::Adding { .. })
    }

    pub fn is_creating(self) -> bool {
        matches!(
            self,
            Self::Editing { creating: true, .. } | Self::Adding { creating: true, .. }
        )
    }

    pub fn with_creating(self, flag: bool) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Editing { index, .. } => Self::Editing {
                index,
                creating: flag,
            },
            Self::Adding { index, .. } => Self::Adding {
                index,
                creating: flag,
            },
        }
    }
}
