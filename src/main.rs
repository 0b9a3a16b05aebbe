use app::{AppState, create_app};
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use config::{Args, read_settings};
use models::weather_source::WeatherSourceHandle;
use std::net::SocketAddr;
use std::sync::Arc;

mod app;
mod config;
mod dashboard;
mod error;
mod models;
mod routes;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    let settings = read_settings(args.config.as_deref()).expect("failed to read settings");
    log::info!(
        "Weather provider {} is not queried, serving fake weather",
        settings.provider.base_url
    );
    if settings.provider.api_key == config::DEFAULT_API_KEY {
        log::debug!("Using the demo api key");
    }

    let source: WeatherSourceHandle = Arc::new(models::fake_weather::create(args.seed));
    let state = AppState {
        source,
        settings: Arc::new(settings),
    };
    let app = create_app(state, &args.assets_path);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    log::info!("listening on {}", addr);
    match (args.key_file_path, args.cert_file_path) {
        (Some(key_file_path), Some(cert_file_path)) => {
            log::info!(
                "using tls with key file {} and cert file {}",
                key_file_path,
                cert_file_path
            );
            let tls = RustlsConfig::from_pem_file(cert_file_path, key_file_path)
                .await
                .expect("failed to read tls certificate");
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await
                .expect("server failed");
        }
        (Some(_), None) | (None, Some(_)) => {
            log::error!("Both a key file and a cert file are needed for tls");
            std::process::exit(1);
        }
        (None, None) => {
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await
                .expect("server failed");
        }
    }
}
