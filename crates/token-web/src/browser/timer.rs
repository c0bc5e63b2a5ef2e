use std::time::Duration;

use token_interactions::Scheduler;

/// `setTimeout` through gloo-timers. Server builds never fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    #[cfg(feature = "hydrate")]
    type Handle = gloo_timers::callback::Timeout;
    #[cfg(not(feature = "hydrate"))]
    type Handle = ();

    #[cfg(feature = "hydrate")]
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, task)
    }

    #[cfg(not(feature = "hydrate"))]
    fn schedule(&self, _delay: Duration, _task: Box<dyn FnOnce()>) -> Self::Handle {}

    #[cfg(feature = "hydrate")]
    fn cancel(&self, handle: Self::Handle) {
        drop(handle.cancel());
    }

    #[cfg(not(feature = "hydrate"))]
    fn cancel(&self, _handle: Self::Handle) {}
}
