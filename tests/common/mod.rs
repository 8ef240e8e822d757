//! Helpers shared by the integration tests.

use std::net::SocketAddr;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

/// Serves `configure` on an ephemeral local port and returns the backend base URL.
///
/// The server runs on the current test runtime and stops with it.
pub fn spawn_backend<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind mock backend");
    let addr: SocketAddr = server.addrs()[0];
    let server: Server = server.run();
    actix_web::rt::spawn(server);
    format!("http://{addr}/Backoffice/api")
}
