use std::sync::Arc;

use mcp_tool_server::{
    build_app,
    config::Config,
    domain::{builtin::register_builtin_tools, tools::ToolRegistry},
    logging,
    mcp::server::McpServer,
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let registry = Arc::new(ToolRegistry::new());
    register_builtin_tools(&registry);

    let bind_socket = config.bind_socket()?;
    let server = McpServer::new(config.server_info.clone(), registry.clone());
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        server_name = %server.info().name,
        server_version = %server.info().version,
        max_body_bytes = config.max_body_bytes,
        tools = registry.len(),
        "server starting"
    );

    let state = AppState::new(server).max_body_bytes(config.max_body_bytes);
    let app = build_app(state);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
