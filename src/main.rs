use clap::Parser;
use pagewise::SourceKind;
use pagewise::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagewise", about = "Browse paged search results and files in the terminal")]
struct Args {
    /// Page source to browse
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// Search query (search source)
    #[arg(short, long)]
    query: Option<String>,

    /// File to page through (file source)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Items per page
    #[arg(long)]
    page_size: Option<usize>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // A file given on the command line implies the file source.
    let cli = CliOverrides {
        source: args
            .source
            .or_else(|| args.file.as_ref().map(|_| SourceKind::File)),
        query: args.query,
        file: args.file,
        page_size: args.page_size,
    };

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::PagewiseConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to pagewise.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("pagewise.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("Pagewise starting up with source: {:?}", resolved.source);

    let source = match pagewise::tui::build_source(&resolved) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("pagewise: {e}");
            std::process::exit(2);
        }
    };

    pagewise::tui::run(resolved, source)
}
