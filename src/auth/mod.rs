pub mod authenticator;
pub mod session;

pub use authenticator::{Authenticator, CredentialsAuthenticator, Session};
pub use session::SessionStore;
