//! Activation Coordinator - The single "which item is active" selector
//!
//! Thin shared state: an `Option<usize>` selector signal plus the
//! notification channel that tells the surrounding screen about changes
//! (to hide chrome, show an overlay). At most one item is active at a time.
//!
//! Single-writer rule: only a tap's end handler mutates the selector, via
//! [`ActivationCoordinator::toggle`]. Reactors read it; the control thread
//! drains [`ActivationNotifications`]. The send is fire-and-forget, so the
//! gesture/animation context never blocks on the application side.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver, Sender};

use spark_signals::{signal, Signal};

// =============================================================================
// COORDINATOR
// =============================================================================

pub struct ActivationCoordinator {
    selector_signal: Signal<Option<usize>>,
    /// Untracked mirror of the selector. The idle-branch scroll follow reads
    /// this instead of the signal so it neither subscribes to selector edges
    /// nor fights the activation tween.
    current: Rc<Cell<Option<usize>>>,
    notifier: Sender<Option<usize>>,
}

impl ActivationCoordinator {
    /// Create the coordinator and the control-thread end of its
    /// notification channel.
    pub fn new() -> (Self, ActivationNotifications) {
        let (tx, rx) = channel();
        (
            Self {
                selector_signal: signal(None),
                current: Rc::new(Cell::new(None)),
                notifier: tx,
            },
            ActivationNotifications { rx },
        )
    }

    /// The reactive selector, for edge-triggered subscribers.
    pub fn selector_signal(&self) -> Signal<Option<usize>> {
        self.selector_signal.clone()
    }

    /// Current selector value without subscribing.
    pub fn current(&self) -> Option<usize> {
        self.current.get()
    }

    /// Untracked handle to the selector mirror, for reactor closures.
    pub(crate) fn current_cell(&self) -> Rc<Cell<Option<usize>>> {
        self.current.clone()
    }

    /// Tap end handler. Toggles against the *global* selector value:
    ///
    /// - nothing active: the tapped item becomes active
    /// - anything active (the tapped item or another): everything deactivates
    ///
    /// So tapping item B while item A is active deactivates A instead of
    /// switching to B; reaching B takes a second tap. This matches the
    /// shipped behavior and is flagged in DESIGN.md pending product
    /// confirmation.
    ///
    /// Exactly one notification is sent per accepted change, carrying the
    /// new value.
    pub fn toggle(&self, tapped_index: usize) -> Option<usize> {
        let next = if self.current.get().is_none() {
            Some(tapped_index)
        } else {
            None
        };
        self.current.set(next);
        self.selector_signal.set(next);
        cdebug!("active selector -> {next:?}");
        // Fire-and-forget across the thread boundary; a closed control side
        // is not this context's problem.
        let _ = self.notifier.send(next);
        next
    }
}

// =============================================================================
// NOTIFICATIONS (control-thread side)
// =============================================================================

/// Receiving end of the activation channel. Lives on the application/control
/// thread; drain it from the control loop.
pub struct ActivationNotifications {
    rx: Receiver<Option<usize>>,
}

impl ActivationNotifications {
    /// Invoke `on_active_change` for every pending notification, in order.
    /// Returns how many were delivered.
    pub fn drain(&self, mut on_active_change: impl FnMut(Option<usize>)) -> usize {
        let mut delivered = 0;
        while let Ok(next) = self.rx.try_recv() {
            on_active_change(next);
            delivered += 1;
        }
        delivered
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_activates_when_none() {
        let (coordinator, notifications) = ActivationCoordinator::new();
        assert_eq!(coordinator.toggle(2), Some(2));
        assert_eq!(coordinator.current(), Some(2));
        assert_eq!(coordinator.selector_signal().get(), Some(2));

        let mut seen = Vec::new();
        assert_eq!(notifications.drain(|n| seen.push(n)), 1);
        assert_eq!(seen, vec![Some(2)]);
    }

    #[test]
    fn test_toggle_other_item_deactivates_instead_of_switching() {
        let (coordinator, notifications) = ActivationCoordinator::new();
        coordinator.toggle(2);

        // Tapping item 5 while 2 is active deactivates; it does not switch
        assert_eq!(coordinator.toggle(5), None);
        assert_eq!(coordinator.current(), None);

        let mut seen = Vec::new();
        notifications.drain(|n| seen.push(n));
        assert_eq!(seen, vec![Some(2), None]);
    }

    #[test]
    fn test_second_tap_reaches_new_item() {
        let (coordinator, _notifications) = ActivationCoordinator::new();
        coordinator.toggle(2);
        coordinator.toggle(5); // deactivates
        assert_eq!(coordinator.toggle(5), Some(5));
    }

    #[test]
    fn test_one_notification_per_accepted_change() {
        let (coordinator, notifications) = ActivationCoordinator::new();
        coordinator.toggle(0);
        coordinator.toggle(0);
        coordinator.toggle(1);
        assert_eq!(notifications.drain(|_| {}), 3);
        assert_eq!(notifications.drain(|_| {}), 0);
    }

    #[test]
    fn test_notifications_cross_thread() {
        let (coordinator, notifications) = ActivationCoordinator::new();

        let handle = std::thread::spawn(move || {
            let mut seen = Vec::new();
            // Poll until both notifications arrive
            while seen.len() < 2 {
                notifications.drain(|n| seen.push(n));
            }
            seen
        });

        coordinator.toggle(3);
        coordinator.toggle(1);

        assert_eq!(handle.join().unwrap(), vec![Some(3), None]);
    }

    #[test]
    fn test_send_with_closed_receiver_does_not_panic() {
        let (coordinator, notifications) = ActivationCoordinator::new();
        drop(notifications);
        assert_eq!(coordinator.toggle(0), Some(0));
    }
}
