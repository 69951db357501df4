//! Client side of the movie API: the HTTP client, the remote favorites
//! source, and the session facade UI code talks to.

mod api;
mod remote;
mod session;

pub use api::{ApiClient, ApiError, WriteAck};
pub use remote::RemoteFavorites;
pub use session::MovieSession;
