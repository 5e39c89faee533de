mod cli;
mod fonts_cmd;
mod recode_cmd;
mod shared;
mod vmetrics_cmd;
mod widths_cmd;

use clap::Parser;
use cli::Cli;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Fonts {
            ref file,
            ref format,
            strict,
        } => fonts_cmd::run(file, format, strict),
        cli::Commands::Widths {
            ref file,
            ref font,
            ref format,
        } => widths_cmd::run(file, font, format),
        cli::Commands::Vmetrics {
            ref file,
            ref font,
            ref format,
        } => vmetrics_cmd::run(file, font, format),
        cli::Commands::Recode {
            ref file,
            ref output,
            strict,
            ref format,
        } => recode_cmd::run(file, output, strict, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
