use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Repeating tick source for a question's time limit.
///
/// The handle owns the background task: `cancel` or dropping the handle stops
/// it, and no tick is delivered after cancellation even if one was already
/// queued.
#[derive(Debug)]
pub struct Countdown {
    ticks: mpsc::Receiver<()>,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// Start ticking every `period`, first tick one period from now.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self {
            ticks: rx,
            task: Some(task),
        }
    }

    /// Wait for the next tick; `None` once cancelled.
    pub async fn next_tick(&mut self) -> Option<()> {
        if self.task.is_none() {
            return None;
        }
        self.ticks.recv().await
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.ticks.close();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let start = Instant::now();
        let mut countdown = Countdown::start(Countdown::DEFAULT_PERIOD);

        countdown.next_tick().await.unwrap();
        let first = start.elapsed();
        countdown.next_tick().await.unwrap();
        let second = start.elapsed();

        assert!(first >= Duration::from_secs(1) && first < Duration::from_secs(2));
        assert!(second >= Duration::from_secs(2) && second < Duration::from_secs(3));
        assert!(countdown.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_countdown_stops_ticking() {
        let mut countdown = Countdown::start(Duration::from_millis(10));
        countdown.next_tick().await.unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;

        countdown.cancel();
        assert!(countdown.next_tick().await.is_none());
        assert!(!countdown.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_countdown_aborts_task() {
        let countdown = Countdown::start(Duration::from_secs(1));
        let handle = countdown
            .task
            .as_ref()
            .map(JoinHandle::abort_handle)
            .unwrap();

        drop(countdown);
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        assert!(handle.is_finished());
    }
}
