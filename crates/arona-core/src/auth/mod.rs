//! Authentication: credential sources, token payload decoding and the
//! session state machine.

mod credentials;
mod jwt;
mod session;

pub use credentials::{BearerToken, CookieSession, CredentialKind, CredentialSource};
pub use jwt::decode_profile;
pub use session::{CallbackError, Navigation, SessionManager, SessionState};
