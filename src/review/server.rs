// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::future::pending;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal::ctrl_c;
use tokio::time::sleep;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::error::Fallible;
use crate::error::fail;
use crate::review::answer::fail_handler;
use crate::review::answer::pass_handler;
use crate::review::driver::Driver;
use crate::review::get::main_handler;
use crate::review::get::quit_handler;
use crate::review::get::show_handler;
use crate::review::state::ServerState;

/// Serve the review session until it quits. In-flight requests are allowed
/// to finish before this returns.
pub async fn start_server(config: ServerConfig, driver: Driver) -> Fallible<()> {
    if !config.assets.is_dir() {
        return fail("assets directory does not exist.");
    }

    let state = ServerState::new(config.labels, driver);
    let app = Router::new();
    let app = app.route("/", get(main_handler));
    let app = app.route("/show", get(show_handler));
    let app = app.route("/pass", get(pass_handler));
    let app = app.route("/fail", get(fail_handler));
    let app = app.route("/quit", get(quit_handler));
    let app = app.nest_service("/_", ServeDir::new(&config.assets));
    let app = app.fallback(main_handler);
    let app = app.with_state(state.clone());
    let bind = format!("0.0.0.0:{}", config.port);

    if config.open {
        // Start a separate task to open the browser.
        let url = format!("http://localhost:{}/", config.port);
        let bind = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&bind).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::warn!("Failed to open {url}: {e}");
            }
        });
    }

    log::debug!(
        "Starting server on {bind}, serving assets from {}",
        config.assets.display()
    );
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;
    log::debug!("Server stopped.");
    Ok(())
}

/// Resolves when the session quits, or on Ctrl-C. Ending the session also
/// abandons a fetch waiting on the driver, so in-flight requests finish.
async fn shutdown_signal(state: ServerState) {
    tokio::select! {
        _ = state.shutdown.wait() => {}
        _ = interrupted() => {
            log::debug!("Interrupted.");
            state.end_session().await;
        }
    }
}

async fn interrupted() {
    if let Err(e) = ctrl_c().await {
        log::warn!("Cannot listen for Ctrl-C: {e}");
        pending::<()>().await;
    }
}
