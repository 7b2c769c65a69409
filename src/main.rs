mod ui;

use anyhow::Result;
use clap::Parser;

use neonpass::alphabet::ClassSet;
use neonpass::generator::{self, GenerationConfig};
use neonpass::source::RandomSource;
use neonpass::strength;

#[derive(Parser)]
#[command(
    name = "neonpass",
    version,
    author,
    about = "Character-class password generator with offline strength estimation"
)]
struct Cli {
    /// Password length
    #[arg(short, long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..))]
    length: u16,

    /// Leave out uppercase letters
    #[arg(long)]
    no_uppercase: bool,

    /// Leave out digits
    #[arg(long)]
    no_numbers: bool,

    /// Leave out symbols
    #[arg(long)]
    no_symbols: bool,

    /// Number of passwords to generate
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Print passwords only, no stats
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let classes = ClassSet {
        uppercase: !cli.no_uppercase,
        numbers: !cli.no_numbers,
        symbols: !cli.no_symbols,
    };
    let config = GenerationConfig {
        length: cli.length as usize,
        classes,
    };

    let mut random_source = RandomSource::new();

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet || cli.count > 1,
    };

    for _ in 0..cli.count {
        let password = generator::generate(&config, &mut random_source)?;
        let result = strength::estimate(&password, classes);
        ui::display_output(
            &password,
            &result,
            &config,
            random_source.is_secure(),
            &options,
        );
    }

    Ok(())
}
