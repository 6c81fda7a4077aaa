// Adapters layer: concrete implementations of the domain ports for the outside world.

pub mod http;
pub mod prompt;
