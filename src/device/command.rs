use super::remote::{Key, KeyAction, TouchAction, TouchPoint};
use super::response::ResponseMode;

/// A single ECP POST command
///
/// Every variant renders to one bodiless request line terminated by an empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Key(KeyAction, Key),
    Touch(TouchAction, TouchPoint),
    Launch(u32),
    /// Path and query sent verbatim, no escaping
    Custom(String),
}

impl Command {
    /// Get the path of the command
    pub fn endpoint(&self) -> String {
        match self {
            Self::Key(action, key) => format!("/key{}/{}", action.name(), key.name()),
            Self::Touch(action, point) => {
                format!("/touch{}/{}.{}", action.name(), point.x, point.y)
            }
            Self::Launch(id) => format!("/launch/{}", id),
            Self::Custom(path) => path.clone(),
        }
    }

    /// Exact bytes written to the socket
    pub fn encode(&self) -> Vec<u8> {
        format!("POST {} HTTP/1.1\r\n\r\n", self.endpoint()).into_bytes()
    }

    /// How the reply to this command is judged
    pub fn response_mode(&self) -> ResponseMode {
        match self {
            Self::Key(_, key) if key.is_probe() => ResponseMode::Liveness,
            _ => ResponseMode::Status,
        }
    }
}
