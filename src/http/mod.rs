//! HTTP Transport layer for the Model Context Protocol
//!
//! Provides the external API routing around the `/mcp` endpoint.

pub mod handlers;
