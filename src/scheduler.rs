use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::models::Config;
use crate::screening::run_and_log;

/// How often the scheduler wakes to check whether a run is due
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// The first fire time strictly after `now`
pub fn next_fire_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if now < today {
        today
    } else {
        today + ChronoDuration::days(1)
    }
}

/// Run the screening once a day at `config.schedule_time` until Ctrl-C.
///
/// A failed or panicking run is logged and the loop keeps going.
pub async fn run_daily(config: Arc<Config>) {
    let mut next_fire = next_fire_after(Local::now().naive_local(), config.schedule_time);
    info!("⏰ Scheduler started, next run at {}", next_fire);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Scheduler stopped by user");
                break;
            }
            _ = tokio::time::sleep(CHECK_INTERVAL) => {}
        }

        let now = Local::now().naive_local();
        if now < next_fire {
            continue;
        }

        let run_config = Arc::clone(&config);
        let run = tokio::spawn(async move { run_and_log(&run_config).await });
        if !await_run(run, shutdown.as_mut()).await {
            info!("Scheduler stopped by user");
            break;
        }

        next_fire = next_fire_after(Local::now().naive_local(), config.schedule_time);
        info!("⏰ Next run at {}", next_fire);
    }
}

/// Wait for a spawned run, aborting it if `shutdown` resolves first.
///
/// Returns `false` when the scheduler should stop.
async fn await_run<S: Future>(mut run: JoinHandle<bool>, mut shutdown: Pin<&mut S>) -> bool {
    tokio::select! {
        _ = shutdown.as_mut() => {
            run.abort();
            false
        }
        joined = &mut run => {
            if let Err(e) = joined {
                error!("❌ Error in scheduler: {}", e);
            }
            true
        }
    }
}
