//! glimpse - live terminal monitor.
//!
//! Usage:
//!   glimpse                       # refresh every second
//!   glimpse 5                     # refresh every 5 seconds
//!   glimpse --log-file /tmp/g.log -vv

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tikv_jemallocator::Jemalloc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use glimpse::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use glimpse::collector::mock::MockFs;
use glimpse::collector::procfs::SourcePaths;
use glimpse::collector::procfs::process::DEFAULT_PAGE_SIZE;
use glimpse::rates::DEFAULT_CLK_TCK;
use glimpse::signal::KillDispatcher;
use glimpse::tui::{App, AppState};

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Live terminal monitor for processes, GPU clients, connections and devices.
#[derive(Parser)]
#[command(name = "glimpse", about = "Live system monitor", version)]
struct Args {
    /// Refresh interval in seconds.
    #[arg(value_name = "INTERVAL", default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: PathBuf,

    /// Path to /sys filesystem (for testing/mocking).
    #[arg(long, default_value = "/sys")]
    sys_path: PathBuf,

    /// Write logs to this file. Nothing is logged without it, the terminal
    /// belongs to the UI.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run without root. Other users' fd, io and fdinfo files stay unreadable,
    /// so the GPU, DISK and NET tabs will be incomplete.
    #[arg(long)]
    allow_unprivileged: bool,
}

/// Installs a file subscriber. `RUST_LOG` adds to the `-v` level.
fn init_logging(path: &Path, verbose: u8) -> std::io::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut filter = EnvFilter::from_default_env();
    match format!("glimpse={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Warning: bad log directive: {}", e),
    }

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Reads a positive `sysconf` value, falling back to `default`.
fn sysconf_or(name: libc::c_int, default: u64) -> u64 {
    // SAFETY: sysconf only reads a configuration value.
    let value = unsafe { libc::sysconf(name) };
    u64::try_from(value).ok().filter(|v| *v > 0).unwrap_or(default)
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file
        && let Err(e) = init_logging(path, args.verbose)
    {
        eprintln!("Error: cannot open log file '{}': {}", path.display(), e);
        std::process::exit(1);
    }

    // SAFETY: geteuid cannot fail and has no side effects.
    let euid = unsafe { libc::geteuid() };
    if euid != 0 && !args.allow_unprivileged {
        eprintln!("Error: glimpse must run as root to read other processes' counters");
        eprintln!("       (use --allow-unprivileged to run with partial data)");
        std::process::exit(1);
    }

    let quit = Arc::new(AtomicBool::new(false));
    let q = quit.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        q.store(true, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let paths = SourcePaths {
        proc_path: args.proc_path,
        sys_path: args.sys_path,
        ..SourcePaths::default()
    };
    let page_size = sysconf_or(libc::_SC_PAGESIZE, DEFAULT_PAGE_SIZE);
    let clk_tck = sysconf_or(libc::_SC_CLK_TCK, DEFAULT_CLK_TCK);
    info!(
        proc = %paths.proc_path.display(),
        sys = %paths.sys_path.display(),
        page_size,
        clk_tck,
        "starting"
    );

    #[cfg(target_os = "linux")]
    let state = AppState::with_fs(RealFs::new(), &paths, page_size, clk_tck);
    #[cfg(not(target_os = "linux"))]
    let state = AppState::with_fs(MockFs::typical_system(), &paths, page_size, clk_tck);

    let app = App::new(state, Box::new(KillDispatcher), quit);
    if let Err(e) = app.run(Duration::from_secs(args.interval)) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
