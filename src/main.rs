use stalwart_ews::{
    server::http::{init_ews_server, start_ews_server},
    services::housekeeper::spawn_housekeeper,
};
use store::config::env_settings::EnvSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    // Read configuration parameters
    let settings = EnvSettings::new();

    // Build the EWS server and start the housekeeper
    let (server, housekeeper_rx) = init_ews_server(&settings);
    spawn_housekeeper(server.clone(), &settings, housekeeper_rx);

    // Start HTTP server
    start_ews_server(server, settings).await
}
