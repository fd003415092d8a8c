//! compiles declarative transit-simulation models into complete SUMO input
//! bundles: route files, stop and vehicle descriptors, and a run
//! configuration per simulation block.
use clap::Parser;
use transitc::app::TransitcApp;

fn main() {
    env_logger::init();
    log::info!("starting transitc at {}", chrono::Local::now().to_rfc3339());
    let args = TransitcApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
