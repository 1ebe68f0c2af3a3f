mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bearwin",
    version,
    about = "Bear Window: a thin event-dispatching facade over Win32 windows"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Open demo windows and log their events until all are closed
    Demo(commands::demo::DemoArgs),
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// Translate a raw window message into its domain event
    Translate(commands::debug::translate::TranslateArgs),
    /// Open a window and print every event it receives
    Events,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Demo(args) => commands::demo::execute(&args),
        Commands::Debug { command } => match command {
            DebugCommands::Translate(args) => commands::debug::translate::execute(&args),
            DebugCommands::Events => commands::debug::events::execute(),
        },
    }
}
