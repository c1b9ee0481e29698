pub mod fixtures;
pub mod routes;
pub mod store;
pub mod telemetry;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use payloads::{ClientError, StatusCode};
use std::net::TcpListener;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use store::{Call, Endpoint, MockBackend, StoreError};

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
}

/// Build the mock backend server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, backend: MockBackend) -> std::io::Result<Server> {
    let backend = web::Data::new(backend);

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        // The UI is served from another origin during development
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .service(routes::api_services())
            .app_data(backend.clone())
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub address: String,
    pub client: payloads::APIClient,
    pub backend: MockBackend,
}

impl TestApp {
    /// A fresh client against this app, for code that wants to own one.
    pub fn api_client(&self) -> payloads::APIClient {
        payloads::APIClient::new(self.address.clone())
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
    };
    let backend = MockBackend::default();
    let server = build(&mut config, backend.clone()).unwrap();
    tokio::spawn(server);

    let address = format!("http://127.0.0.1:{}", config.port);
    TestApp {
        port: config.port,
        client: payloads::APIClient::new(address.clone()),
        address,
        backend,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(result: Result<T, ClientError>, expected: StatusCode) {
    match result {
        Err(ClientError::APIError(code, _)) => assert_eq!(code, expected),
        _ => panic!("Expected APIError"),
    };
}
