use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use jtt1078::media::split_access_units;
use jtt1078::{Encoder, MemorySink, PacketHeader, PacketSink, StreamConfig, TcpSink, VideoCodec};

#[derive(Clone, Copy, ValueEnum)]
enum Codec {
    H264,
    H265,
}

impl From<Codec> for VideoCodec {
    fn from(c: Codec) -> Self {
        match c {
            Codec::H264 => VideoCodec::H264,
            Codec::H265 => VideoCodec::H265,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "jtt1078-push",
    about = "Push an H.264/H.265 elementary stream to a JT/T 1078 server"
)]
struct Args {
    /// Annex B elementary stream file
    input: PathBuf,

    /// KEY=VALUE config file (SERVER_IP, SERVER_PORT, SIM_NUMBER, CHANNEL)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Server IP address
    #[arg(long)]
    server_ip: Option<String>,

    /// Server port
    #[arg(long)]
    port: Option<u16>,

    /// Terminal SIM number (up to 12 digits)
    #[arg(long)]
    sim: Option<String>,

    /// Logical channel number
    #[arg(long)]
    channel: Option<u8>,

    #[arg(long, value_enum, default_value = "h265")]
    codec: Codec,

    /// Frames per second used to pace the stream
    #[arg(long, default_value_t = 25)]
    fps: u32,

    /// Restart from the beginning at end of file
    #[arg(long = "loop")]
    repeat: bool,

    /// Encode into memory and print packet headers instead of connecting
    #[arg(long)]
    dump: bool,
}

fn stream_config(args: &Args) -> jtt1078::Result<StreamConfig> {
    let mut cfg = match &args.config {
        Some(path) => StreamConfig::from_file(path)?,
        None => StreamConfig::default(),
    };
    if let Some(ip) = &args.server_ip {
        cfg.server_ip = ip.clone();
    }
    if let Some(port) = args.port {
        cfg.server_port = port;
    }
    if let Some(sim) = &args.sim {
        cfg.sim_number = sim.clone();
    }
    if let Some(channel) = args.channel {
        cfg.channel = channel;
    }
    Ok(cfg)
}

/// Encode every access unit of `data`, pacing at `fps` when `paced`.
fn push<S: PacketSink>(
    encoder: &mut Encoder<S>,
    data: &[u8],
    fps: u32,
    paced: bool,
    repeat: bool,
) -> jtt1078::Result<()> {
    let codec = encoder.config().video_codec;
    let units = split_access_units(data, codec);
    if units.is_empty() {
        tracing::warn!("no access units found in input");
        return Ok(());
    }

    let frame_period = Duration::from_secs(1) / fps.max(1);
    let started = Instant::now();
    let mut next_frame = started;
    let mut last_report = started;
    let mut pts = 0u64;

    loop {
        for unit in &units {
            encoder.encode_video_frame(&unit.as_frame(pts))?;
            pts += frame_period.as_millis() as u64;

            if last_report.elapsed() >= Duration::from_secs(10) {
                let stats = encoder.stats();
                tracing::info!(
                    packets = stats.packets_sent,
                    bytes = stats.bytes_sent,
                    frames = stats.frames_sent,
                    next_seq = encoder.next_sequence(),
                    "streaming"
                );
                last_report = Instant::now();
            }

            next_frame += frame_period;
            if paced && let Some(wait) = next_frame.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
        }
        if !repeat {
            return Ok(());
        }
    }
}

fn run(args: &Args) -> jtt1078::Result<()> {
    let cfg = stream_config(args)?;
    let data = std::fs::read(&args.input)?;
    let encoder_config = cfg.encoder_config(args.codec.into());

    if args.dump {
        let mut encoder = Encoder::new(encoder_config, MemorySink::new())?;
        push(&mut encoder, &data, args.fps, false, false)?;
        for packet in encoder.sink().packets() {
            if let Some(header) = PacketHeader::decode(packet) {
                println!("{header}");
            }
        }
        return Ok(());
    }

    let sink = TcpSink::connect(cfg.server_addr())?;
    let mut encoder = Encoder::new(encoder_config, sink)?;
    let result = push(&mut encoder, &data, args.fps, true, args.repeat);

    let stats = encoder.stats();
    tracing::info!(
        packets = stats.packets_sent,
        bytes = stats.bytes_sent,
        frames = stats.frames_sent,
        aborted = stats.frames_aborted,
        "stream finished"
    );
    result
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jtt1078-push: {e}");
            ExitCode::FAILURE
        }
    }
}
