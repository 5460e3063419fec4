//! Unit tests for the task driver.

#[cfg(test)]
mod driver {
    use crate::{MAX_TRANSITIONS_PER_TICK, StepOutcome, TaskDriver, TaskEnd, TaskStatus};

    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    enum S {
        A,
        B,
        C,
    }

    #[test]
    fn falls_through_to_success() {
        let mut d = TaskDriver::new(vec![S::A, S::B, S::C]);
        let mut seen = Vec::new();
        let end = d.tick(|s| {
            seen.push(s);
            StepOutcome::Next
        });
        assert_eq!(end, Some(TaskEnd::succeeded()));
        assert_eq!(seen, vec![S::A, S::B, S::C]);
        assert_eq!(d.current(), None);
        // Ticking an ended task is inert.
        assert_eq!(d.tick(|_| StepOutcome::Next), None);
    }

    #[test]
    fn wait_resumes_same_step() {
        let mut d = TaskDriver::new(vec![S::A, S::B]);
        let mut waits = 2;
        for _ in 0..2 {
            let end = d.tick(|s| match s {
                S::B if waits > 0 => {
                    waits -= 1;
                    StepOutcome::Wait
                }
                _ => StepOutcome::Next,
            });
            assert_eq!(end, None);
            assert_eq!(d.current(), Some(S::B));
        }
        assert!(d.tick(|_| StepOutcome::Next).unwrap().is_success());
    }

    #[test]
    fn jump_reenters_earlier_step() {
        let mut d = TaskDriver::new(vec![S::A, S::B, S::C]);
        let mut loops = 0;
        let end = d.tick(|s| match s {
            S::C if loops < 2 => {
                loops += 1;
                StepOutcome::JumpTo(S::A)
            }
            _ => StepOutcome::Next,
        });
        assert_eq!(loops, 2);
        assert!(end.unwrap().is_success());
    }

    #[test]
    fn endless_jumps_yield() {
        let mut d = TaskDriver::new(vec![S::A, S::B]);
        let mut calls = 0;
        let end = d.tick(|_| {
            calls += 1;
            StepOutcome::JumpTo(S::A)
        });
        assert_eq!(end, None);
        assert_eq!(calls, MAX_TRANSITIONS_PER_TICK);
        assert_eq!(d.current(), Some(S::A));
    }

    #[test]
    fn end_and_bad_jump() {
        let mut d = TaskDriver::new(vec![S::A, S::B]);
        let end = d.tick(|_| StepOutcome::End(TaskEnd::errored("boom"))).unwrap();
        assert_eq!(end.status, TaskStatus::Errored);
        assert_eq!(end.to_string(), "errored (boom)");

        let mut d = TaskDriver::new(vec![S::A]);
        let end = d.tick(|_| StepOutcome::JumpTo(S::C)).unwrap();
        assert_eq!(end.status, TaskStatus::Errored);
    }

    #[test]
    fn external_end_sticks() {
        let mut d = TaskDriver::new(vec![S::A]);
        d.end(TaskEnd::cancelled());
        d.end(TaskEnd::succeeded());
        assert_eq!(d.ended(), Some(TaskEnd::cancelled()));
        assert_eq!(d.tick(|_| StepOutcome::Next), None);
    }
}
