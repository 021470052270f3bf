//! Tests for the cancelable quiescence timer

#[cfg(test)]
mod tests {
    use pointillize::algorithm::phase::PhaseController;

    // Tests a scheduled start fires once when due
    // Verified by leaving the pending entry in place after firing
    #[test]
    fn test_fires_once_when_due() {
        let mut phase = PhaseController::new();
        let token = phase.schedule(10, 5);

        assert!(phase.is_pending());
        assert!(phase.is_live(token));
        assert_eq!(phase.poll(14), None);

        let start = phase.poll(15).expect("due at frame 15");
        assert_eq!(start.token, token);
        assert_eq!(start.frame, 15);
        assert!(!phase.is_pending());
        assert_eq!(phase.poll(16), None);
    }

    // Tests rescheduling invalidates the earlier token
    // Verified by keeping both schedules
    #[test]
    fn test_reschedule_replaces_pending() {
        let mut phase = PhaseController::new();
        let first = phase.schedule(0, 5);
        let second = phase.schedule(3, 5);

        assert!(second > first);
        assert!(!phase.is_live(first));
        assert!(phase.is_live(second));
        assert_eq!(phase.poll(5), None);
        assert_eq!(phase.poll(8).map(|start| start.token), Some(second));
    }

    // Tests cancellation prevents a stale timer from firing
    // Verified by making cancel a no-op
    #[test]
    fn test_cancel_prevents_firing() {
        let mut phase = PhaseController::new();
        let token = phase.schedule(0, 1);

        assert_eq!(phase.cancel(), Some(token));
        assert!(!phase.is_live(token));
        assert_eq!(phase.poll(100), None);
        assert_eq!(phase.cancel(), None);
    }

    // Tests a zero delay fires on the next poll
    // Verified by requiring strictly later frames
    #[test]
    fn test_zero_delay() {
        let mut phase = PhaseController::new();
        phase.schedule(7, 0);
        assert!(phase.poll(7).is_some());
    }
}
