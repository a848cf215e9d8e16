use std::fmt::Display;
use std::fs;
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use artprobe_core::{
    ArtCommand, ArtIpProg, ArtIpProgReply, ArtPacket, ArtPoll, ArtPollReply, DEFAULT_RECEIVED_AT,
    OutboundPacket, Received, ReplyRecord, TransportConfig, UdpTransport, collect_replies,
    format_timestamp, request, send_packet,
};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ARTPROBE_BUILD_COMMIT"),
    " ",
    env!("ARTPROBE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "artprobe")]
#[command(version = VERSION)]
#[command(
    about = "Discover and configure Art-Net nodes (ArtPoll, ArtIpProg, ArtCommand).",
    long_about = None,
    after_help = "Examples:\n  artprobe poll --all\n  artprobe --dest 2.0.0.10 ipprog --ip 2.0.0.50 --subnet 255.0.0.0\n  artprobe command SWOFF --dry-run\n  artprobe decode 'captures/*.bin' --json"
)]
struct Cli {
    #[command(flatten)]
    transport: TransportArgs,

    /// Log protocol traffic at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct TransportArgs {
    /// TOML file with transport settings
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Destination IPv4 address (broadcast or unicast)
    #[arg(long, global = true, value_name = "IP")]
    dest: Option<Ipv4Addr>,

    /// Destination UDP port
    #[arg(long, global = true, value_name = "N")]
    port: Option<u16>,

    /// Local address to bind, e.g. 0.0.0.0:6454
    #[arg(long, global = true, value_name = "ADDR")]
    bind: Option<SocketAddrV4>,

    /// How long to wait for replies
    #[arg(long, global = true, value_name = "N")]
    timeout_ms: Option<u64>,

    /// Do not enable SO_BROADCAST on the socket
    #[arg(long, global = true)]
    no_broadcast: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send an ArtPoll and print the ArtPollReply
    Poll {
        /// Print replies as JSON
        #[arg(long)]
        json: bool,

        /// Keep listening until the timeout and print every reply
        #[arg(long)]
        all: bool,

        /// Print the encoded packet as hex instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Read back or change a node's network settings (ArtIpProg)
    #[command(
        after_help = "Without any setting flags the node only reports its current configuration."
    )]
    Ipprog(IpProgArgs),

    /// Send a free-text ArtCommand (no reply expected)
    Command {
        /// Command text, e.g. SWOFF
        text: String,

        /// Print the encoded packet as hex instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Decode raw reply datagrams stored in files
    Decode {
        /// Files or glob patterns, one datagram per file
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print decoded packets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective transport configuration as TOML
    Config,
}

#[derive(Args, Debug)]
struct IpProgArgs {
    /// New IP address
    #[arg(long, value_name = "IP")]
    ip: Option<Ipv4Addr>,

    /// New subnet mask
    #[arg(long, value_name = "IP")]
    subnet: Option<Ipv4Addr>,

    /// New default gateway
    #[arg(long, value_name = "IP")]
    gateway: Option<Ipv4Addr>,

    /// New Art-Net UDP port
    #[arg(long, value_name = "N")]
    prog_port: Option<u16>,

    /// Switch the node to DHCP
    #[arg(long, conflicts_with = "static_addressing")]
    dhcp: bool,

    /// Switch the node to static addressing
    #[arg(long = "static")]
    static_addressing: bool,

    /// Return network parameters to factory defaults
    #[arg(long)]
    reset: bool,

    /// Print the reply as JSON
    #[arg(long)]
    json: bool,

    /// Print the encoded packet as hex instead of sending it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(&cli.transport).and_then(|config| match cli.command {
        Commands::Poll { json, all, dry_run } => cmd_poll(&config, json, all, dry_run),
        Commands::Ipprog(args) => cmd_ipprog(&config, args),
        Commands::Command { text, dry_run } => cmd_command(&config, text, dry_run),
        Commands::Decode { inputs, json } => cmd_decode(&inputs, json),
        Commands::Config => cmd_config(&config),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn load_config(args: &TransportArgs) -> Result<TransportConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => TransportConfig::load(path).map_err(|err| {
            CliError::new(
                format!("failed to load config {}: {}", path.display(), err),
                Some(
                    "known keys: destination, port, bind, broadcast, timeout_ms".to_string(),
                ),
            )
        })?,
        None => TransportConfig::default(),
    };
    if let Some(dest) = args.dest {
        config.destination = dest;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if args.no_broadcast {
        config.broadcast = false;
    }
    debug!(?config, "effective transport config");
    Ok(config)
}

fn cmd_poll(
    config: &TransportConfig,
    json: bool,
    all: bool,
    dry_run: bool,
) -> Result<(), CliError> {
    let poll = ArtPoll::new();
    if dry_run {
        return print_hex(&poll);
    }

    let mut transport = open_transport(config)?;
    let destination = config.destination_addr();
    if all {
        send_packet(&mut transport, &poll, destination).context("failed to send ArtPoll")?;
        let replies = collect_replies(&mut transport, config.timeout(), ArtPollReply::decode)
            .context("failed to receive ArtPollReply")?;
        info!(count = replies.len(), "poll window closed");
        if replies.is_empty() {
            return Err(no_reply(config));
        }
        return print_replies(replies, json);
    }

    let reply = request(
        &mut transport,
        &poll,
        destination,
        config.timeout(),
        ArtPollReply::decode,
    )
    .context("ArtPoll exchange failed")?
    .ok_or_else(|| no_reply(config))?;
    print_reply(reply, json)
}

fn cmd_ipprog(config: &TransportConfig, args: IpProgArgs) -> Result<(), CliError> {
    let mut prog = ArtIpProg::new();
    if let Some(ip) = args.ip {
        prog.set_new_ip(ip);
    }
    if let Some(mask) = args.subnet {
        prog.set_new_subnet_mask(mask);
    }
    if let Some(gateway) = args.gateway {
        prog.set_new_gateway(gateway);
    }
    if let Some(port) = args.prog_port {
        prog.set_new_port(port);
    }
    if args.dhcp {
        prog.set_dhcp(true);
    } else if args.static_addressing {
        prog.set_dhcp(false);
    }
    if args.reset {
        prog.set_reset_defaults();
    }
    if prog.is_readback() {
        info!("no settings given, requesting current configuration");
    }
    if args.dry_run {
        return print_hex(&prog);
    }

    let mut transport = open_transport(config)?;
    let reply = request(
        &mut transport,
        &prog,
        config.destination_addr(),
        config.timeout(),
        ArtIpProgReply::decode,
    )
    .context("ArtIpProg exchange failed")?
    .ok_or_else(|| no_reply(config))?;
    print_reply(reply, args.json)
}

fn cmd_command(config: &TransportConfig, text: String, dry_run: bool) -> Result<(), CliError> {
    let command = ArtCommand::new(text).map_err(|err| {
        CliError::new(
            format!("invalid command: {}", err),
            Some("ArtCommand text is limited to 511 bytes".to_string()),
        )
    })?;
    if dry_run {
        return print_hex(&command);
    }

    let mut transport = open_transport(config)?;
    let destination = config.destination_addr();
    let sent = send_packet(&mut transport, &command, destination)
        .context("failed to send ArtCommand")?;
    eprintln!("OK: sent {} bytes -> {}", sent, destination);
    Ok(())
}

#[derive(Debug, Serialize)]
struct DecodedFile {
    path: String,
    #[serde(flatten)]
    record: ReplyRecord<ArtPacket>,
}

fn cmd_decode(inputs: &[PathBuf], json: bool) -> Result<(), CliError> {
    let mut paths = Vec::new();
    for input in inputs {
        paths.extend(resolve_input_paths(input)?);
    }

    let mut decoded = Vec::new();
    let mut failed = 0usize;
    for path in &paths {
        match decode_file(path) {
            Ok(file) => {
                if !json {
                    println!("{}:", file.path);
                    println!("{}", file.record.packet);
                    println!();
                }
                decoded.push(file);
            }
            Err(err) => {
                failed += 1;
                eprintln!("error: {:#}", err);
            }
        }
    }

    if json {
        print_json(&decoded)?;
    }
    if failed > 0 {
        return Err(CliError::new(
            format!("{} of {} files failed to decode", failed, paths.len()),
            Some(
                "each file must hold exactly one ArtPollReply or ArtIpProgReply datagram"
                    .to_string(),
            ),
        ));
    }
    Ok(())
}

fn decode_file(path: &Path) -> anyhow::Result<DecodedFile> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let packet = ArtPacket::decode(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let received_at = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|modified| format_timestamp(OffsetDateTime::from(modified)))
        .unwrap_or_else(|_| DEFAULT_RECEIVED_AT.to_string());
    Ok(DecodedFile {
        path: path.display().to_string(),
        record: ReplyRecord {
            received_at,
            source: None,
            packet,
        },
    })
}

fn cmd_config(config: &TransportConfig) -> Result<(), CliError> {
    let text = config
        .to_toml_string()
        .context("failed to render config")?;
    print!("{}", text);
    Ok(())
}

fn open_transport(config: &TransportConfig) -> Result<UdpTransport, CliError> {
    UdpTransport::open(config).map_err(|err| {
        CliError::new(
            format!("cannot open UDP socket on {}: {}", config.bind, err),
            Some("another Art-Net tool may hold the port; try --bind 0.0.0.0:0".to_string()),
        )
    })
}

fn no_reply(config: &TransportConfig) -> CliError {
    CliError::new(
        format!(
            "no reply from {} within {} ms",
            config.destination_addr(),
            config.timeout_ms
        ),
        Some("check --dest, or raise --timeout-ms".to_string()),
    )
}

fn print_hex<P: OutboundPacket>(packet: &P) -> Result<(), CliError> {
    let bytes = packet.encode();
    let hex = bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", hex);
    Ok(())
}

fn print_reply<P: Display + Serialize>(reply: Received<P>, json: bool) -> Result<(), CliError> {
    if json {
        return print_json(&ReplyRecord::from(reply));
    }
    println!(
        "from {} at {}",
        reply.source,
        format_timestamp(reply.received_at)
    );
    println!("{}", reply.packet);
    Ok(())
}

fn print_replies<P: Display + Serialize>(
    replies: Vec<Received<P>>,
    json: bool,
) -> Result<(), CliError> {
    if json {
        let records = replies
            .into_iter()
            .map(ReplyRecord::from)
            .collect::<Vec<_>>();
        return print_json(&records);
    }
    for reply in replies {
        print_reply(reply, false)?;
        println!();
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{}", json);
    Ok(())
}

fn resolve_input_paths(input: &Path) -> Result<Vec<PathBuf>, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    matches.sort();
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
