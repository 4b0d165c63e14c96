//! Kalshi market maker feed replay
//!
//! Streams raw Kalshi WebSocket frames (one JSON message per line) from a file
//! or stdin through the adapter into the engine, then reports final quotes and
//! PnL per ticker.
//!
//! Usage: kalshi_mm [capture.jsonl | -]

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver};
use kalshi::{
    init_tracing, BookSide, Engine, EventSender, FeedAdapter, Heartbeat, KalshiFeedAdapter,
    KalshiMarketMaker, MarketMakerConfig, ResyncRequest, ShutdownManager,
};
use kalshi_mm_bot::bin_common::{
    load_config_from_env, parse_args, BinaryRunner, ConfigType, FeedInput, RunConfig,
};
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy)]
struct ReaderStats {
    lines: u64,
    events: u64,
}

struct ReplayApp {
    run_config: RunConfig,
    config: MarketMakerConfig,
    input: FeedInput,
    shutdown: ShutdownManager,
    heartbeat: Heartbeat,
}

impl ReplayApp {
    fn new(config: MarketMakerConfig, input: FeedInput) -> Self {
        let run_config = RunConfig::new("Kalshi Market Maker (replay)");
        let heartbeat = Heartbeat::from_secs(run_config.heartbeat_interval_secs);
        Self {
            run_config,
            config,
            input,
            shutdown: ShutdownManager::new(),
            heartbeat,
        }
    }

    fn spawn_reader(&self, sender: EventSender) -> Result<JoinHandle<Result<ReaderStats>>> {
        let input = self.input.clone();
        let running = self.shutdown.flag();

        let handle = thread::Builder::new()
            .name("feed-reader".to_string())
            .spawn(move || read_feed(input, sender, running))?;
        Ok(handle)
    }

    fn log_resync_requests(&self, resync_rx: &Receiver<ResyncRequest>) {
        for request in resync_rx.try_iter() {
            warn!(
                "[Replay] Resync needed for {} (sid={}, last applied {}, received {})",
                request.ticker, request.subscription_id, request.last_applied_seq, request.received_seq
            );
        }
    }

    fn log_final_state(engine: &Engine<KalshiMarketMaker>) {
        engine.with_strategy(|mm| {
            for ticker in mm.tickers() {
                match mm.quotes(&ticker) {
                    Some(q) => info!(
                        "[Replay] {} quotes YES {}/{} NO {}/{}",
                        ticker, q.yes.bid_price_cents, q.yes.ask_price_cents, q.no.bid_price_cents, q.no.ask_price_cents
                    ),
                    None => info!("[Replay] {} no quotes (book not ready)", ticker),
                }
                if let Some(book) = mm.books().lookup(&ticker) {
                    info!("[Replay] {}", book.book().format_summary(BookSide::Yes));
                }
                if let Some(pnl) = mm.pnl_snapshot(&ticker) {
                    info!(
                        "[Replay] {} pos yes={} no={} | cash={}c realized={}c unrealized={}c equity={}c | fills={}",
                        ticker,
                        pnl.yes_position,
                        pnl.no_position,
                        pnl.cash_cents,
                        pnl.realized_pnl_cents,
                        pnl.unrealized_pnl_cents,
                        pnl.equity_cents,
                        pnl.fill_count
                    );
                }
            }
        });
    }
}

impl BinaryRunner for ReplayApp {
    async fn run(&mut self) -> Result<String> {
        self.shutdown.spawn_signal_handler();

        let (resync_tx, resync_rx) = unbounded();
        let strategy = KalshiMarketMaker::from_config(&self.config).with_resync_sender(resync_tx);
        let mut engine = Engine::new(strategy, self.config.engine.clone());
        engine.start()?;

        info!("[Replay] Reading feed from {}", self.input.describe());
        let reader = self.spawn_reader(engine.sender())?;
        let poll = Duration::from_millis(self.run_config.poll_interval_ms);

        while self.shutdown.is_running() && !reader.is_finished() {
            self.log_resync_requests(&resync_rx);
            if self.heartbeat.tick() {
                info!("[Replay] Heartbeat: {} events queued", engine.pending());
            }
            self.shutdown.interruptible_sleep(poll).await;
        }

        // A reader blocked on stdin is abandoned rather than joined
        let reader_stats = if reader.is_finished() {
            match reader.join() {
                Ok(result) => result?,
                Err(_) => anyhow::bail!("feed reader thread panicked"),
            }
        } else {
            self.shutdown.trigger();
            ReaderStats::default()
        };

        let stats = engine.stop()?;
        self.log_resync_requests(&resync_rx);
        Self::log_final_state(&engine);

        Ok(format!(
            "Lines read: {}, events parsed: {}, processed: {}, discarded: {}",
            reader_stats.lines, reader_stats.events, stats.processed, stats.discarded
        ))
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }
}

fn read_feed(input: FeedInput, sender: EventSender, running: Arc<AtomicBool>) -> Result<ReaderStats> {
    let reader: Box<dyn BufRead> = match &input {
        FeedInput::Stdin => Box::new(BufReader::new(io::stdin())),
        FeedInput::File(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening feed file {}", path.display()))?,
        )),
    };

    let adapter = KalshiFeedAdapter::new();
    let mut stats = ReaderStats::default();

    for line in reader.lines() {
        if !running.load(Ordering::Acquire) {
            break;
        }
        let line = line.context("reading feed")?;
        stats.lines += 1;

        if let Some(event) = adapter.parse(line.trim()) {
            sender.push(event)?;
            stats.events += 1;
        }
    }

    Ok(stats)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = load_config_from_env(ConfigType::MarketMaker);
    let config = MarketMakerConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    init_tracing(&config.log_level);
    config.log();

    let input = FeedInput::from_args(&parse_args());
    let mut app = ReplayApp::new(config, input);
    app.execute().await
}
