/// State of a resource fetched once per screen (global summary, highlights,
/// coin detail).
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> Loadable<T> {
    /// Maps a fetch result, replacing any error with `failure_message`.
    pub fn from_result<E>(result: Result<T, E>, failure_message: &str) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(_) => Loadable::Failed(failure_message.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}
