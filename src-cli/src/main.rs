//! Volunteer CLI
//!
//! ```bash
//! volunteer login volunteer@example.com --password secret
//! volunteer events --query beach --page 2
//! volunteer register 12
//! volunteer my-events | jq '.data[].title'
//! ```

use anyhow::Result;
use clap::Parser;

use volunteer_lib::{run, Args};

#[tokio::main]
async fn main() -> Result<()> {
    volunteer_core::init_logging();

    let args = Args::parse();
    run(args).await
}
