use clap::Parser;
use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use parley::core::constants::LOG_FILE;
use parley::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "parley")]
#[command(version)]
#[command(about = "A terminal chat client for a remote inference endpoint")]
#[command(long_about = "Parley is a full-screen terminal chat client. It sends each message \
you type to a remote inference endpoint and shows the reply in a scrollable \
transcript. The conversation is saved locally and restored on the next start.\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+T            Switch between the light and dark theme\n\
  Ctrl+C            Quit the application\n\n\
Set RUST_LOG to write diagnostics to a log file in the data directory.")]
struct Args {}

#[tokio::main]
async fn main() {
    let _args = Args::parse();

    if let Err(err) = init_tracing() {
        eprintln!("Warning: could not set up logging: {err}");
    }

    if let Err(err) = run_chat().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Route tracing output to a file in the data directory when RUST_LOG is
/// set. The alternate-screen TUI owns stdout, so nothing may log there.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let proj_dirs = ProjectDirs::from("org", "parley", "parley")
        .ok_or("could not determine a data directory for this platform")?;
    fs::create_dir_all(proj_dirs.data_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(proj_dirs.data_dir().join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
