use std::process::Child;

use crate::core::state::CommandStatus;

pub const JOB_SLOTS: usize = 64;

/// Background children in a fixed set of slots. A reaped job frees its
/// slot; once every slot is taken, new jobs run untracked.
pub struct JobTable {
    slots: Vec<Option<Child>>,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

impl JobTable {
    pub fn new() -> Self {
        Self::with_capacity(JOB_SLOTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        JobTable { slots }
    }

    /// Inserts into the first free slot. A full table hands the child
    /// back untracked.
    pub fn insert(&mut self, child: Child) -> Option<Child> {
        for slot in self.slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(child);
                return None;
            }
        }
        Some(child)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-blocking sweep over every tracked job, in slot order. Finished
    /// jobs are announced and their slots freed. Runs before each prompt.
    pub fn reap(&mut self) {
        for slot in self.slots.iter_mut() {
            let finished = match slot {
                Some(child) => match child.try_wait() {
                    Ok(Some(status)) => {
                        println!(
                            "background pid {} is done: {}",
                            child.id(),
                            CommandStatus::from(status)
                        );
                        true
                    }
                    Ok(None) => false,
                    // A wait error means the child is already gone; free
                    // the slot without an announcement.
                    Err(_) => true,
                },
                None => false,
            };
            if finished {
                *slot = None;
            }
        }
    }

    /// Kills and collects every tracked job. Used by `exit` and on
    /// end-of-input teardown.
    pub fn kill_all(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Some(mut child) = slot.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use std::thread;
    use std::time::Duration;

    fn spawn_sleep(seconds: &str) -> Child {
        Command::new("/bin/sleep").arg(seconds).spawn().unwrap()
    }

    #[test]
    fn test_insert_and_reap() {
        let mut jobs = JobTable::new();
        assert!(jobs.is_empty());

        assert!(jobs.insert(spawn_sleep("0.1")).is_none());
        assert_eq!(jobs.len(), 1);

        // Not done yet: a reap must not block or drop the slot.
        jobs.reap();
        assert_eq!(jobs.len(), 1);

        thread::sleep(Duration::from_millis(500));
        jobs.reap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_full_table_drops_tracking() {
        let mut jobs = JobTable::with_capacity(1);
        assert!(jobs.insert(spawn_sleep("1")).is_none());

        let rejected = jobs.insert(spawn_sleep("0.1"));
        assert_eq!(jobs.len(), 1);

        // The table keeps working for the job it does track; the rejected
        // child is collected by hand so it does not linger.
        jobs.kill_all();
        assert!(jobs.is_empty());
        let mut rejected = rejected.unwrap();
        let _ = rejected.kill();
        let _ = rejected.wait();
    }

    #[test]
    fn test_kill_all_collects_children() {
        let mut jobs = JobTable::new();
        jobs.insert(spawn_sleep("30"));
        jobs.insert(spawn_sleep("30"));
        assert_eq!(jobs.len(), 2);

        jobs.kill_all();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_slot_reuse_after_reap() {
        let mut jobs = JobTable::with_capacity(1);
        let mut first = spawn_sleep("0");
        let _ = first.wait();
        assert!(jobs.insert(first).is_none());
        // Reaping the finished job frees the only slot for the next one.
        jobs.reap();
        assert!(jobs.is_empty());
        assert!(jobs.insert(spawn_sleep("0.1")).is_none());
        jobs.kill_all();
    }
}
