//! Built-in nodes, one module per upstream service.

pub mod teamdeck;
