use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use photodisc::cache::{CatalogCache, JsonFileCache, NoCache};
use photodisc::export::{self, ExportOptions};
use photodisc::materialize::MaterializeOptions;
use photodisc::sequence::DateRange;
use photodisc::timestamp::Normalizer;
use photodisc::{config, output};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn version_string() -> &'static str {
    let on_tag = env!("PHOTODISC_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("PHOTODISC_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "photodisc")]
#[command(about = "Export iPhoto libraries into a static, browsable photo disc")]
#[command(long_about = "\
Export iPhoto libraries into a static, browsable photo disc

Events become folders, photos are copied under date-stamped names next to
generated thumbnails, and a data file lets the bundled viewer browse events,
photos and faces without a server.

Output structure:

  disc/
  ├── index.html, inc/...                      # Site template, copied verbatim
  ├── inc/data.js                              # var events / photos / faces
  └── photos/
      ├── 2013-04-01 - Trip to the lake/
      │   └── 2013-04-01 09-12-44 - 1 - Pier.jpg
      └── thumbnails/
          └── 2013-04-01 - Trip to the lake/
              └── thumb_2013-04-01 09-12-44 - 1 - Pier.jpg

Run 'photodisc gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// iPhoto library to export (repeatable, exported in order)
    #[arg(long = "library", short = 'l', required = true)]
    libraries: Vec<PathBuf>,

    /// Output root; must not exist yet
    #[arg(long, short = 'o')]
    output: PathBuf,

    /// Skip events before this date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Skip events after this date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Losslessly re-encode every written file
    #[arg(long)]
    reencode: bool,

    /// Abort on the first copy or tool failure
    #[arg(long)]
    strict: bool,

    /// Site template copied into the output root
    #[arg(long)]
    site: Option<PathBuf>,

    /// Keep parsed catalogs here between runs
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Config file (TOML), layered over the stock defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Export events, photos and faces into a new output root
    Export(ExportArgs),
    /// Copy the site template into an output root without touching photos
    UpdateSite {
        /// Output root
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Site template directory
        #[arg(long, default_value = "site")]
        site: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Export(args) => run_export(args)?,
        Command::UpdateSite { output, site } => {
            let copied = export::update_site(&site, &output)?;
            output::print_update_site(copied);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_export(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config(args.config.as_deref())?;
    let options = ExportOptions {
        output: args.output,
        site: args.site,
        manifest_path: PathBuf::from(&config.manifest.path),
        range: DateRange::new(args.start_date, args.end_date),
        titles: config.title_filter()?,
        normalizer: Normalizer::capture(),
        materialize: MaterializeOptions {
            reencode: args.reencode,
            thumbnail_size: config.thumbnails.size,
            strict: args.strict,
        },
    };
    let cache: Box<dyn CatalogCache> = match args.cache_dir {
        Some(dir) => Box::new(JsonFileCache::new(dir)),
        None => Box::new(NoCache),
    };

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_export_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = export::export(
        &args.libraries,
        &options,
        config.tools.media_tool(),
        cache.as_ref(),
        Some(tx),
    );
    printer.join().ok();
    let summary = result?;
    output::print_export_summary(&summary);
    Ok(())
}
