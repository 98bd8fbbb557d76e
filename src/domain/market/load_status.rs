use std::fmt;

/// Progress of the most recent listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Ready => "ready",
            LoadStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}
