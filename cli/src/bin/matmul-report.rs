use clap::Parser;
use matmul_report_cli::{command, setup_logger, Cli};

fn main() -> anyhow::Result<()> {
    let _guard = setup_logger();

    let cli = Cli::parse();
    command::handle_command(cli)
}
