//! HTTP server for the dispatch endpoint

use super::routes;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tutor_application::DispatchUseCase;

/// Application state shared across handlers
pub struct AppState {
    pub dispatch: DispatchUseCase,
}

impl AppState {
    pub fn new(dispatch: DispatchUseCase) -> Self {
        Self { dispatch }
    }
}

/// Run the HTTP server until the process is stopped
pub async fn serve(state: AppState, addr: SocketAddr) -> io::Result<()> {
    let app = routes::router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
