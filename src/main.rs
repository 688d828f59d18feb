use std::sync::Arc;

use devserve::config::{AppState, Config};
use devserve::{logger, net, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Connections are served one at a time, a single thread is all the loop uses
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let network_ip = net::discover_local_ip();

    let state = Arc::new(AppState::new(cfg)?);
    let listener = server::create_listener(addr)?;
    let port = listener.local_addr()?.port();

    logger::log_server_start(port, &network_ip);

    server::run(listener, state).await;
    Ok(())
}
