//! Academic Records API - Main Entry Point
//!
//! Starts the web API server for the academic records frontend.

use records_api::{run_server, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("╔════════════════════════════════════════════════╗");
    println!("║   Academic Records API                         ║");
    println!("║   Categories → Careers → Students              ║");
    println!("╚════════════════════════════════════════════════╝");
    println!();

    run_server(Config::from_env()).await
}
