//! Tool model: schemas, tool definitions, the registry and the sample tools
//!
//! Everything the device exposes over MCP is described here; the protocol
//! layer only reads it.

pub mod builtin;
pub mod schema;
pub mod tools;
