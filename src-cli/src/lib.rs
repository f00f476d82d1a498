//! Volunteer command shell
//!
//! Each invocation restores the stored session, runs one command and prints
//! its JSON result on stdout.

pub mod args;
pub mod commands;
pub mod state;

pub use args::{Args, Command};
pub use commands::CommandResult;
pub use state::AppState;

use serde::Serialize;

/// Run one command to completion.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    let state = AppState::new(config)?;
    state.initialize();

    match args.command {
        Command::Login { email, password } => {
            print(commands::login(&state, &email, &password).await)
        }
        Command::Signup(signup) => print(commands::signup(&state, signup).await),
        Command::Logout => print(commands::logout(&state)),
        Command::Whoami => print(commands::whoami(&state)),
        Command::Events { query, page } => print(commands::events(&state, query, page).await),
        Command::Event { id } => print(commands::event(&state, id).await),
        Command::Register { id } => print(commands::register(&state, id).await),
        Command::MyEvents => print(commands::my_events(&state).await),
        Command::Route => print(commands::route(&state)),
    }
}

fn print<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<()> {
    println!("{}", result.to_json()?);
    if !result.success {
        tracing::debug!(error = result.error.as_deref().unwrap_or(""), "Command failed");
    }
    Ok(())
}
