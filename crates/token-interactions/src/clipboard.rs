//! Copy-to-clipboard with a self-expiring "copied" flag.
//!
//! The flag drives the "Copied!" tooltip next to copy icons. It holds at most
//! one value; a newer copy replaces it and restarts the expiry timer.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::error::ClipboardError;
use crate::scheduler::Scheduler;

/// Default time the copied flag stays up
pub const DEFAULT_FEEDBACK: Duration = Duration::from_millis(2000);

/// Write access to the system clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
}

type Listener = Box<dyn Fn(Option<&str>)>;

struct CopyState<H> {
    copied_value: Option<String>,
    /// Timer of the current value. Left in place after it fires, released on
    /// the next copy or on teardown.
    pending_reset: Option<H>,
    /// Bumped on every successful copy; a timer only clears its own generation.
    generation: u64,
    /// Sequence number handed to the latest `trigger` call
    requested: u64,
    /// Sequence number of the request currently shown
    applied: u64,
}

struct Shared<C, S: Scheduler> {
    clipboard: C,
    scheduler: S,
    reset_after: Duration,
    state: RefCell<CopyState<S::Handle>>,
    listener: RefCell<Option<Listener>>,
}

impl<C, S: Scheduler> Shared<C, S> {
    fn expire(&self, generation: u64) {
        {
            let mut state = self.state.borrow_mut();
            if state.generation != generation {
                return;
            }
            state.copied_value = None;
        }
        log::debug!("Copied flag expired");
        self.notify(None);
    }

    fn notify(&self, value: Option<&str>) {
        // Taken out for the call so the listener may replace itself
        let Some(listener) = self.listener.borrow_mut().take() else {
            return;
        };
        listener(value);

        let mut slot = self.listener.borrow_mut();
        if slot.is_none() {
            *slot = Some(listener);
        }
    }
}

impl<C, S: Scheduler> Drop for Shared<C, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.state.get_mut().pending_reset.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// Copies text and remembers, for a short while, what was copied.
///
/// Cloning is cheap and every clone observes the same state. Dropping the last
/// clone cancels the pending expiry.
pub struct ClipboardCopyController<C, S: Scheduler> {
    shared: Rc<Shared<C, S>>,
}

impl<C, S: Scheduler> Clone for ClipboardCopyController<C, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<C, S> ClipboardCopyController<C, S>
where
    C: Clipboard + 'static,
    S: Scheduler + 'static,
{
    pub fn new(clipboard: C, scheduler: S, reset_after: Duration) -> Self {
        Self {
            shared: Rc::new(Shared {
                clipboard,
                scheduler,
                reset_after,
                state: RefCell::new(CopyState {
                    copied_value: None,
                    pending_reset: None,
                    generation: 0,
                    requested: 0,
                    applied: 0,
                }),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Register a callback invoked with the new copied value whenever it
    /// changes (`Some` on copy, `None` on expiry). Replaces any earlier one.
    pub fn set_listener(&self, listener: impl Fn(Option<&str>) + 'static) {
        *self.shared.listener.borrow_mut() = Some(Box::new(listener));
    }

    /// Write `value` to the clipboard and raise the copied flag for it.
    ///
    /// On failure the flag is left as it was and the error is returned. Writes
    /// that finish after a later request has already raised the flag do not
    /// take it back.
    pub async fn trigger(&self, value: impl Into<String>) -> Result<(), ClipboardError> {
        let value = value.into();
        let request = {
            let mut state = self.shared.state.borrow_mut();
            state.requested += 1;
            state.requested
        };

        if let Err(err) = self.shared.clipboard.write_text(&value).await {
            log::warn!("Copy to clipboard failed: {}", err);
            return Err(err);
        }

        self.mark_copied(value, request);
        Ok(())
    }

    /// Whether `value` is the currently copied value and has not expired.
    pub fn is_copied(&self, value: &str) -> bool {
        self.shared.state.borrow().copied_value.as_deref() == Some(value)
    }

    pub fn copied_value(&self) -> Option<String> {
        self.shared.state.borrow().copied_value.clone()
    }

    pub fn reset_after(&self) -> Duration {
        self.shared.reset_after
    }

    fn mark_copied(&self, value: String, request: u64) {
        let (superseded, generation) = {
            let mut state = self.shared.state.borrow_mut();
            if request < state.applied {
                log::debug!("Ignoring completion of superseded copy request {}", request);
                return;
            }
            state.applied = request;
            state.generation += 1;
            state.copied_value = Some(value.clone());
            (state.pending_reset.take(), state.generation)
        };

        if let Some(handle) = superseded {
            self.shared.scheduler.cancel(handle);
        }

        let weak: Weak<Shared<C, S>> = Rc::downgrade(&self.shared);
        let handle = self.shared.scheduler.schedule(
            self.shared.reset_after,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.expire(generation);
                }
            }),
        );
        self.shared.state.borrow_mut().pending_reset = Some(handle);

        self.shared.notify(Some(&value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use futures::channel::oneshot;
    use futures::executor::{LocalPool, block_on};
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Clone, Default)]
    struct FakeClipboard {
        contents: Rc<RefCell<Option<String>>>,
        deny: Rc<Cell<bool>>,
    }

    impl Clipboard for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.deny.get() {
                return Err(ClipboardError::rejected("NotAllowedError"));
            }
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn controller() -> (
        ClipboardCopyController<FakeClipboard, ManualScheduler>,
        FakeClipboard,
        ManualScheduler,
    ) {
        let clipboard = FakeClipboard::default();
        let scheduler = ManualScheduler::new();
        let ctrl = ClipboardCopyController::new(clipboard.clone(), scheduler.clone(), Duration::from_millis(1500));
        (ctrl, clipboard, scheduler)
    }

    #[test]
    fn starts_empty() {
        let (ctrl, _, scheduler) = controller();
        assert_eq!(ctrl.copied_value(), None);
        assert!(!ctrl.is_copied(""));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn copy_writes_clipboard_and_sets_flag() {
        let (ctrl, clipboard, _) = controller();

        block_on(ctrl.trigger("0x1f9840a85d5af5bf1d1762f925bdaddc4201f984")).unwrap();

        assert_eq!(
            clipboard.contents.borrow().as_deref(),
            Some("0x1f9840a85d5af5bf1d1762f925bdaddc4201f984")
        );
        assert!(ctrl.is_copied("0x1f9840a85d5af5bf1d1762f925bdaddc4201f984"));
        assert!(!ctrl.is_copied("0x"));
    }

    #[test]
    fn flag_clears_exactly_at_expiry() {
        let (ctrl, _, scheduler) = controller();
        block_on(ctrl.trigger("abc")).unwrap();

        scheduler.advance(Duration::from_millis(1499));
        assert!(ctrl.is_copied("abc"));

        scheduler.advance(Duration::from_millis(1));
        assert!(!ctrl.is_copied("abc"));
        assert_eq!(ctrl.copied_value(), None);
    }

    #[test]
    fn recopy_restarts_timer() {
        let (ctrl, _, scheduler) = controller();
        block_on(ctrl.trigger("abc")).unwrap();
        scheduler.advance(Duration::from_millis(1000));

        block_on(ctrl.trigger("abc")).unwrap();
        scheduler.advance(Duration::from_millis(1000));
        assert!(ctrl.is_copied("abc"), "first timer must not clear the second copy");
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_millis(500));
        assert!(!ctrl.is_copied("abc"));
    }

    #[test]
    fn failed_write_leaves_previous_state() {
        let (ctrl, clipboard, scheduler) = controller();
        block_on(ctrl.trigger("first")).unwrap();

        clipboard.deny.set(true);
        let err = block_on(ctrl.trigger("second")).unwrap_err();

        assert_eq!(err, ClipboardError::rejected("NotAllowedError"));
        assert!(ctrl.is_copied("first"));
        assert!(!ctrl.is_copied("second"));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn listener_sees_set_and_expiry() {
        let (ctrl, _, scheduler) = controller();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        ctrl.set_listener(move |value| sink.borrow_mut().push(value.map(str::to_string)));

        block_on(ctrl.trigger("a")).unwrap();
        block_on(ctrl.trigger("b")).unwrap();
        scheduler.advance(Duration::from_secs(2));

        assert_eq!(
            *seen.borrow(),
            vec![Some("a".to_string()), Some("b".to_string()), None]
        );
    }

    #[test]
    fn dropping_controller_cancels_pending_reset() {
        let (ctrl, _, scheduler) = controller();
        block_on(ctrl.trigger("abc")).unwrap();
        assert_eq!(scheduler.pending(), 1);

        drop(ctrl);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn clones_share_state() {
        let (ctrl, _, _) = controller();
        let other = ctrl.clone();

        block_on(other.trigger("shared")).unwrap();
        assert!(ctrl.is_copied("shared"));
    }

    /// Writes block until the test opens the gate registered for their text.
    #[derive(Clone, Default)]
    struct GatedClipboard {
        gates: Rc<RefCell<HashMap<String, oneshot::Receiver<()>>>>,
    }

    impl GatedClipboard {
        fn gate(&self, text: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().insert(text.to_string(), rx);
            tx
        }
    }

    impl Clipboard for GatedClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            let gate = self.gates.borrow_mut().remove(text);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(())
        }
    }

    #[test]
    fn later_request_wins_when_writes_finish_out_of_order() {
        let clipboard = GatedClipboard::default();
        let scheduler = ManualScheduler::new();
        let ctrl = ClipboardCopyController::new(clipboard.clone(), scheduler.clone(), Duration::from_millis(1500));
        let open_v1 = clipboard.gate("v1");
        let open_v2 = clipboard.gate("v2");

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for value in ["v1", "v2"] {
            let ctrl = ctrl.clone();
            spawner
                .spawn_local(async move { ctrl.trigger(value).await.unwrap() })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(ctrl.copied_value(), None);

        open_v2.send(()).unwrap();
        pool.run_until_stalled();
        assert_eq!(ctrl.copied_value().as_deref(), Some("v2"));

        open_v1.send(()).unwrap();
        pool.run_until_stalled();
        assert_eq!(ctrl.copied_value().as_deref(), Some("v2"));
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_millis(1500));
        assert_eq!(ctrl.copied_value(), None);
    }

    #[test]
    fn stale_completion_still_applies_after_newer_failure() {
        #[derive(Clone, Default)]
        struct RejectV2 {
            inner: GatedClipboard,
        }

        impl Clipboard for RejectV2 {
            async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
                self.inner.write_text(text).await?;
                if text == "v2" {
                    return Err(ClipboardError::Unavailable);
                }
                Ok(())
            }
        }

        let clipboard = RejectV2::default();
        let ctrl = ClipboardCopyController::new(clipboard.clone(), ManualScheduler::new(), Duration::from_secs(1));
        let open_v1 = clipboard.inner.gate("v1");

        let mut pool = LocalPool::new();
        let first = ctrl.clone();
        pool.spawner()
            .spawn_local(async move { first.trigger("v1").await.unwrap() })
            .unwrap();
        pool.run_until_stalled();

        assert!(block_on(ctrl.trigger("v2")).is_err());

        open_v1.send(()).unwrap();
        pool.run_until_stalled();
        assert!(ctrl.is_copied("v1"));
    }

    #[test]
    fn listener_can_replace_itself() {
        let (ctrl, _, _) = controller();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let handle = ctrl.clone();
        let sink = seen.clone();
        ctrl.set_listener(move |value| {
            sink.borrow_mut().push(format!("first:{:?}", value));
            let sink = sink.clone();
            handle.set_listener(move |value| sink.borrow_mut().push(format!("second:{:?}", value)));
        });

        block_on(ctrl.trigger("a")).unwrap();
        block_on(ctrl.trigger("b")).unwrap();

        assert_eq!(*seen.borrow(), vec!["first:Some(\"a\")", "second:Some(\"b\")"]);
    }
}
