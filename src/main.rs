// src/main.rs

use stargate::{cli, logging, run};

fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("stargate error: {err:?}");
        std::process::exit(1);
    }

    if let Err(err) = run(args) {
        tracing::error!("{}", err.report());
        std::process::exit(err.exit_code());
    }
}
