use clap::Parser;
use notepad::cli::commands::Cli;
use notepad::cli::handlers;
use notepad::io::config_io;
use notepad::logging;

fn main() {
    let cli = Cli::parse();
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref());

    if let Err(e) = config_io::ensure_data_dir(&data_dir) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    let log_guard = logging::init_logging(&data_dir);

    if let Err(e) = handlers::dispatch(cli, &data_dir) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {}", e);
        drop(log_guard);
        std::process::exit(1);
    }
}
