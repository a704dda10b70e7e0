use chrono::Local;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tickset::{periodic, shared, Clock, Elapsed, Task, TaskSetBuilder};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/config/tickset.toml");

/// Fires every 100 ms of counter time
#[derive(Default)]
struct Heartbeat {
    beats: Arc<AtomicU32>,
}

#[periodic(compensate_tardiness)]
impl Task for Heartbeat {
    fn execute(&mut self, _elapsed: Elapsed, clock: Clock) -> i64 {
        let count = self.beats.fetch_add(1, Ordering::SeqCst) + 1;
        if count % 10 == 0 {
            let now = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            println!("[{}] 💓 [HEARTBEAT] beat #{}", now, count);
        }
        clock.seconds_to_ticks(0.1)
    }
}

/// Backs off a little more after every run
struct Backoff {
    delay: f64,
}

impl Task for Backoff {
    fn execute(&mut self, _elapsed: Elapsed, clock: Clock) -> i64 {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        println!("[{}] 🐢 [BACKOFF] next run in {:.2}s", now, self.delay);
        let ticks = clock.seconds_to_ticks(self.delay);
        self.delay *= 1.5;
        ticks
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let heartbeat = Heartbeat::default();
    let beats = heartbeat.beats.clone();

    let handle = TaskSetBuilder::with_toml(CONFIG_PATH)?
        .task(shared(heartbeat))
        .driver()?
        .start();

    let backoff = shared(Backoff { delay: 0.25 });
    handle.insert(backoff.clone());

    tokio::time::sleep(Duration::from_secs(3)).await;
    handle.remove(&backoff);
    println!("🛑 Backoff task removed");

    tokio::time::sleep(Duration::from_secs(2)).await;
    let task_set = handle.shutdown().await?;

    println!("\n📊 RESULTS after 5 seconds:");
    println!("   Heartbeats: {} (expected ~50)", beats.load(Ordering::SeqCst));
    println!("   Entries left in the queue: {}", task_set.len());
    Ok(())
}
