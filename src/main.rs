use catalog_pages::{config, output, pipeline};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog-pages")]
#[command(about = "Static site generator for image-driven product catalogs")]
#[command(long_about = "\
Static site generator for image-driven product catalogs

Your image directory is the data source. Files named <index>-<name>.jpg are
grouped into products by index, listed in a markdown index, and each product
with images gets a printable <index>.html page with prev/next links.

Directory layout:

  shop/
  ├── catalog.toml       # Optional config (see gen-config)
  ├── 1-Cat.jpg          # Product 1, named \"Cat\"
  ├── 2-Dog.jpg          # Product 2, named \"Dog\"
  ├── 2-Dog-side.jpg     # Second image of product 2
  ├── README.md          # Generated index; edit sizes/descriptions here
  ├── 1.html             # Generated product pages
  └── 2.html

The index is read back on every run, so hand-edited sizes and descriptions
are kept. Products whose images are all gone lose their page.

Set RUST_LOG for detailed logs.")]
#[command(version)]
struct Cli {
    /// Directory holding the product images and catalog.toml
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Directory receiving the index and the product pages
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Log per-file decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the index with the images and write all pages
    Build,
    /// Show the merged catalog without writing anything
    Check {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock catalog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let report = pipeline::build(&cli.source, &cli.output)?;
            output::print_catalog(&report.catalog);
            println!();
            output::print_build_output(&report);
        }
        Command::Check { json } => {
            let (catalog, _) = pipeline::load_catalog(&cli.source, &cli.output)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                output::print_catalog(&catalog);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "catalog_pages=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
