use std::net::SocketAddr;

use actix_web::{middleware, web, App, HttpServer};
use ews::mailbox::Mailbox;
use store::{config::env_settings::EnvSettings, tracing::info};
use tokio::sync::mpsc;

use crate::{
    api::request::handle_ews_request,
    server::UnwrapFailure,
    services::housekeeper::{init_housekeeper, Event},
    EWSServer, DEFAULT_HTTP_PORT,
};

pub fn init_ews_server(
    settings: &EnvSettings,
) -> (web::Data<EWSServer>, mpsc::Receiver<Event>) {
    let (housekeeper, housekeeper_rx) = init_housekeeper();

    (
        web::Data::new(EWSServer {
            mailbox: Mailbox::init(settings)
                .failed_to("initialize mailbox")
                .into(),
            worker_pool: rayon::ThreadPoolBuilder::new()
                .num_threads(
                    settings
                        .parse("worker-pool-size")
                        .filter(|v| *v > 0)
                        .unwrap_or_else(num_cpus::get),
                )
                .build()
                .failed_to("build worker pool"),
            housekeeper,
        }),
        housekeeper_rx,
    )
}

pub async fn start_ews_server(
    server: web::Data<EWSServer>,
    settings: EnvSettings,
) -> std::io::Result<()> {
    let http_addr = SocketAddr::from((
        settings.parse_ipaddr("bind-addr", "127.0.0.1"),
        settings.parse("http-port").unwrap_or(DEFAULT_HTTP_PORT),
    ));

    let max_size_request = server.mailbox.config.max_size_request;

    info!("Starting EWS server at {} (TCP)...", http_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(web::PayloadConfig::new(max_size_request))
            .app_data(server.clone())
            .route("/ews", web::post().to(handle_ews_request))
            .route("/EWS/Exchange.asmx", web::post().to(handle_ews_request))
    })
    .bind(http_addr)?
    .run()
    .await
}
