use super::TransitcOperation;
use clap::Parser;

/// command line tool for compiling transit-simulation models into SUMO
/// simulation input bundles
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TransitcApp {
    #[command(subcommand)]
    pub op: TransitcOperation,
}
