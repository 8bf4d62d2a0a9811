use clap::Parser;
use huddle::TransportKind;
use huddle::adapter;
use huddle::core::config::{self, CliOverrides, HuddleConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "huddle", about = "Meeting session in your terminal")]
struct Args {
    /// Display name shown to other participants
    #[arg(short, long)]
    name: Option<String>,

    /// Room to join (a new one is generated if omitted)
    #[arg(short, long)]
    room: Option<String>,

    /// Where remote participants come from
    #[arg(short, long, value_enum)]
    transport: Option<TransportKind>,

    /// JSON script for the seed transport
    #[arg(long)]
    seed_file: Option<String>,

    /// Log file path
    #[arg(long, default_value = "huddle.log")]
    log_file: String,

    /// Log at info instead of debug
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to huddle.log in current directory by default
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.quiet { LevelFilter::Info } else { LevelFilter::Debug };

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("warning: {e}, using defaults");
        HuddleConfig::default()
    });
    let cli = CliOverrides {
        display_name: args.name,
        room_id: args.room,
        transport: args.transport.map(|kind| kind.as_str().to_string()),
        seed_file: args.seed_file,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Huddle starting up in room {} with transport: {}",
        resolved.room_id,
        resolved.transport
    );

    adapter::run(resolved)
}
