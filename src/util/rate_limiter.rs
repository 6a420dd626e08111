use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Requests seen from one client in the current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    opened: Instant,
    hits: u64,
}

/// Fixed-window counter per client IP: at most `max_requests` per `window`,
/// the count resets when the window that started at the first hit expires.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<IpAddr, Window>>,
    max_requests: u64,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        RateLimiter {
            windows: Arc::new(DashMap::new()),
            max_requests,
            window,
        }
    }

    /// Counts one request from `client`. `Err` carries the time left until
    /// the client's window resets.
    pub fn check(&self, client: IpAddr) -> Result<(), Duration> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: IpAddr, now: Instant) -> Result<(), Duration> {
        let mut window = self.windows.entry(client).or_insert(Window { opened: now, hits: 0 });
        if now.duration_since(window.opened) >= self.window {
            *window = Window { opened: now, hits: 0 };
        }
        if window.hits >= self.max_requests {
            return Err(self.window.saturating_sub(now.duration_since(window.opened)));
        }
        window.hits += 1;
        Ok(())
    }

    /// Forgets clients whose window has expired.
    pub fn prune_expired(&self) {
        let now = Instant::now();
        self.windows.retain(|_, w| now.duration_since(w.opened) < self.window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Prunes once per window in the background for the life of the runtime.
    pub fn spawn_pruning(&self) {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(limiter.window);
            loop {
                interval.tick().await;
                limiter.prune_expired();
                debug!(clients = limiter.tracked_clients(), "Pruned expired rate-limit windows");
            }
        });
    }
}
