use std::thread;
use std::time::{Duration, Instant, SystemTime};

use super::IOResult;

impl<T, E> IOResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Block the running thread for `duration` before each run of the body.
    ///
    /// This defers execution. It is not a timeout.
    pub fn delay(self, duration: Duration) -> Self {
        IOResult::from_fn(move || {
            thread::sleep(duration);
            self.run()
        })
    }

    /// Block the running thread until `deadline` before each run of the body.
    ///
    /// Runs immediately when the deadline has already passed.
    pub fn delay_until(self, deadline: SystemTime) -> Self {
        IOResult::from_fn(move || {
            let wait = deadline
                .duration_since(SystemTime::now())
                .unwrap_or(Duration::ZERO);
            thread::sleep(wait);
            self.run()
        })
    }

    /// Measure how long each run of the body takes.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let (elapsed, value) = IOResult::<_, String>::pure(3).timed().run().unwrap();
    /// assert_eq!(value, 3);
    /// assert!(elapsed.as_secs() < 1);
    /// ```
    pub fn timed(self) -> IOResult<(Duration, T), E> {
        IOResult::from_fn(move || {
            let start = Instant::now();
            let value = self.run()?;
            Ok((start.elapsed(), value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_blocks_before_body() {
        let io = IOResult::<_, String>::from_fn(|| Ok(Instant::now()))
            .delay(Duration::from_millis(25));

        let start = Instant::now();
        let ran_at = io.run().unwrap();
        assert!(ran_at.duration_since(start) >= Duration::from_millis(25));
    }

    #[test]
    fn test_delay_until_past_deadline_runs_immediately() {
        let past = SystemTime::now() - Duration::from_secs(60);
        let start = Instant::now();
        assert_eq!(IOResult::<_, String>::pure(1).delay_until(past).run(), Ok(1));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_delay_until_future_deadline_waits() {
        let deadline = SystemTime::now() + Duration::from_millis(30);
        let io = IOResult::<_, String>::pure(()).delay_until(deadline);
        io.run().unwrap();
        assert!(SystemTime::now() >= deadline);
    }

    #[test]
    fn test_timed_propagates_error() {
        let io = IOResult::<i32, _>::fail("nope").timed();
        assert_eq!(io.run(), Err("nope"));
    }
}
