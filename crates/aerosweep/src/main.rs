use aerosweep::cli::default_data_dir;
use aerosweep::{Cli, commands, init_logging};
use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let mut stdout = std::io::stdout().lock();
    let result = commands::run(args.command, &mut stdout);

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}
