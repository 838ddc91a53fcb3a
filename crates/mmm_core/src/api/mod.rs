pub mod session_json;

pub use session_json::{
    MatchSession, PlayerStatus, SessionCommand, SessionRequest, SessionResponse, SessionStatus,
};
