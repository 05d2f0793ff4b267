pub mod aggregate;

pub use aggregate::{Agent, AgentRef};
