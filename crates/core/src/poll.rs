//! Fixed-interval polling with an optional deadline.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Error, Result};

/// How long a polling loop may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deadline {
	/// Wait until the condition holds, however long that takes.
	#[default]
	Unbounded,
	/// Fail with [`Error::Timeout`] once this much time has passed.
	After(Duration),
}

/// Interval and deadline shared by the broker's polling loops.
///
/// The default deadline is [`Deadline::Unbounded`]: a stalled service blocks
/// the run until the process is interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
	pub interval: Duration,
	pub deadline: Deadline,
}

impl Default for PollPolicy {
	fn default() -> Self {
		Self {
			interval: Duration::from_secs(1),
			deadline: Deadline::Unbounded,
		}
	}
}

impl PollPolicy {
	pub fn new(interval: Duration) -> Self {
		Self {
			interval,
			deadline: Deadline::Unbounded,
		}
	}

	pub fn with_deadline(mut self, deadline: Duration) -> Self {
		self.deadline = Deadline::After(deadline);
		self
	}

	/// Starts timing one polling loop for `condition`.
	pub fn start(&self, condition: &'static str) -> PollClock {
		PollClock {
			policy: *self,
			condition,
			started: Instant::now(),
		}
	}
}

/// Timer for a single polling loop.
#[derive(Debug)]
pub struct PollClock {
	policy: PollPolicy,
	condition: &'static str,
	started: Instant,
}

impl PollClock {
	/// Sleeps one interval, or fails if the deadline has passed.
	pub async fn tick(&self) -> Result<()> {
		if let Deadline::After(limit) = self.policy.deadline {
			let elapsed = self.started.elapsed();
			if elapsed >= limit {
				return Err(Error::Timeout {
					ms: elapsed.as_millis() as u64,
					condition: self.condition.to_string(),
				});
			}
		}

		tokio::time::sleep(self.policy.interval).await;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_policy_is_unbounded() {
		let policy = PollPolicy::default();
		assert_eq!(policy.interval, Duration::from_secs(1));
		assert_eq!(policy.deadline, Deadline::Unbounded);
	}

	#[tokio::test]
	async fn unbounded_clock_keeps_ticking() {
		let clock = PollPolicy::new(Duration::from_millis(1)).start("never");
		for _ in 0..5 {
			clock.tick().await.unwrap();
		}
	}

	#[tokio::test]
	async fn bounded_clock_times_out() {
		let clock = PollPolicy::new(Duration::from_millis(5)).with_deadline(Duration::from_millis(20)).start("files");

		let mut ticks = 0;
		let err = loop {
			match clock.tick().await {
				Ok(()) => ticks += 1,
				Err(err) => break err,
			}
		};

		assert!(ticks >= 1);
		assert!(matches!(err, Error::Timeout { condition, .. } if condition == "files"));
	}
}
