//! main - starts a single-instance UPF N4 control endpoint

use anyhow::Result;
use async_std::channel::Sender;
use async_std::prelude::*;
use clap::Parser;
use signal_hook::consts::signal::*;
use signal_hook_async_std::Signals;
use slog::{Drain, Logger, o};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use upf::{Config, ForwardingTable, InMemoryForwardingTable, Upf};

// Fixed rule installed by --test-seed so the fast path can be exercised
// before any SMF has signalled.
const TEST_SEED_TEID: u32 = 0x1111;
const TEST_SEED_ACTION: u32 = 0x0101_0101;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// UDP address on which to serve N4 signalling from the SMF.
    #[arg(long, default_value = "127.0.0.1:8805")]
    n4_addr: SocketAddr,

    /// Own node address, embedded in every outgoing NodeID and F-SEID IE
    /// and offered to peers as the data-plane address.  Defaults to the
    /// eth0 address.
    #[arg(long, default_value_t = local_ip_address::local_ip().unwrap())]
    node_addr: IpAddr,

    /// Install a fixed forwarding rule at startup for fast-path testing.
    #[arg(long)]
    test_seed: bool,
}

#[async_std::main]
async fn main() -> Result<()> {
    exit_on_panic();
    let logger = init_logging();

    let args = Args::parse();
    let forwarding_table = Arc::new(InMemoryForwardingTable::new());
    if args.test_seed {
        forwarding_table
            .upsert(TEST_SEED_TEID, TEST_SEED_ACTION)
            .await?;
        slog::info!(
            &logger,
            "Seeded forwarding rule {TEST_SEED_TEID:#x} -> {TEST_SEED_ACTION:#x}"
        );
    }

    let upf = Upf::start(
        Config {
            n4_addr: args.n4_addr,
            node_addr: args.node_addr,
        },
        logger,
        forwarding_table,
    )
    .await?;

    wait_for_signal().await?;
    upf.graceful_shutdown().await;

    Ok(())
}

fn init_logging() -> Logger {
    // Use info level logging by default
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "info") }
    }
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog_envlogger::new(drain);
    slog::Logger::root(drain, o!())
}

fn exit_on_panic() {
    let orig_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        orig_hook(panic_info);
        std::process::exit(1);
    }));
}

async fn wait_for_signal() -> Result<i32> {
    let signals = Signals::new([SIGHUP, SIGTERM, SIGINT, SIGQUIT])?;
    let handle = signals.handle();
    let (sig_sender, sig_receiver) = async_std::channel::unbounded();
    let signals_task = async_std::task::spawn(handle_signals(signals, sig_sender));
    let signal = sig_receiver.recv().await;
    handle.close();
    signals_task.await;
    Ok(signal?)
}

async fn handle_signals(signals: Signals, sig_sender: Sender<i32>) {
    let mut signals = signals.fuse();
    while let Some(signal) = signals.next().await {
        match signal {
            SIGHUP => {
                // Reload configuration
                // Reopen the log file
            }
            SIGTERM | SIGINT | SIGQUIT => {
                // Shutdown the system;
                let _ = sig_sender.send(signal).await;
            }
            _ => unreachable!(),
        }
    }
}
