/// Name of the shared map holding session tracking records.
pub const USER_SESSIONS_MAP: &str = "userSessions";

/// Cookie carrying the session id when no explicit header is sent.
pub const SESSION_COOKIE: &str = "SESSION";

/// Header carrying the session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Badge captions above this value are rendered as `99+`.
pub const BADGE_MAX_DISPLAY: usize = 99;
