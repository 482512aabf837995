//! Model Context Protocol (MCP) JSON-RPC handling
//!
//! Provides request decoding, response envelopes, error mapping and method routing.

pub mod rpc;
pub mod server;
