//! Concierge server binary.
//! Run with: cargo run --bin concierge-server

use std::process::ExitCode;

use amanda_concierge::start_concierge;

/// Start the landing-page concierge server.
fn main() -> ExitCode {
    start_concierge::run()
}
