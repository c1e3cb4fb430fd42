mod data;
mod n4;
mod procedures;
mod protocols;
mod shutdown_handle;
mod upf;
mod userplane;

use procedures::HandlerApi;

pub use data::{Config, Session, SessionState, SessionStore};
pub use protocols::pfcp;
pub use shutdown_handle::ShutdownHandle;
pub use upf::Upf;
pub use userplane::{ForwardingError, ForwardingTable, InMemoryForwardingTable};
