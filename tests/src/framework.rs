use super::MockSmf;
use anyhow::Result;
use slog::{Drain, Logger, o};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use upf::{Config, InMemoryForwardingTable, Upf};

// The data-plane address this test UPF claims to own.
pub const UPF_NODE_ADDR: Ipv4Addr = Ipv4Addr::new(193, 168, 1, 3);

pub async fn init() -> Result<(MockSmf, Upf, InMemoryForwardingTable, Logger)> {
    init_with_table(InMemoryForwardingTable::new()).await
}

/// Variant that lets a test constrain the fast-path table, e.g. to force
/// capacity failures.
pub async fn init_with_table(
    table: InMemoryForwardingTable,
) -> Result<(MockSmf, Upf, InMemoryForwardingTable, Logger)> {
    exit_on_panic();
    let logger = init_logging();
    let upf = start_upf(&table, &logger).await?;
    let smf = MockSmf::new(upf.n4_addr(), &logger).await?;
    Ok((smf, upf, table, logger))
}

fn exit_on_panic() {
    let orig_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        orig_hook(panic_info);
        std::process::exit(1);
    }));
}

fn init_logging() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build();
    let drain = std::sync::Mutex::new(drain).fuse();
    let drain = slog_envlogger::new(drain);
    slog::Logger::root(drain, o!())
}

async fn start_upf(table: &InMemoryForwardingTable, logger: &Logger) -> Result<Upf> {
    Upf::start(
        Config {
            // Port 0 so that concurrent tests never contend for the N4 port.
            n4_addr: "127.0.0.1:0".parse()?,
            node_addr: IpAddr::V4(UPF_NODE_ADDR),
        },
        logger.new(o!("upf" => 1)),
        Arc::new(table.clone()),
    )
    .await
}
