use std::time::Duration;

/// Blocking pause between outbound requests (retry delay, politeness delay).
#[cfg_attr(test, mockall::automock)]
pub trait Pacer: Send + Sync {
    fn pause(&self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
