mod forwarding;

pub use forwarding::{ForwardingError, ForwardingTable, InMemoryForwardingTable};
