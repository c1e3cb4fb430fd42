mod association_release;
mod association_setup;
mod handler_api;
mod n4_handler;
mod procedure;
mod session_establishment;
mod session_modification;

pub use handler_api::HandlerApi;
pub use n4_handler::N4Handler;
pub use procedure::Procedure;
