//! Tracing support for `IOResult`. Requires the `tracing` feature.

use super::IOResult;

impl<T, E> IOResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Enter `span` for the duration of every run.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::<_, String>::pure(42).instrument(tracing::info_span!("answer"));
    /// assert_eq!(io.run(), Ok(42));
    /// ```
    pub fn instrument(self, span: tracing::Span) -> Self {
        IOResult::from_fn(move || {
            let _entered = span.enter();
            self.run()
        })
    }

    /// Log the success value as JSON at `INFO` and pass it through.
    ///
    /// Requires the `serde` feature as well. A value that fails to serialize is
    /// logged at `WARN` and still passed through. Errors are not logged.
    #[cfg(feature = "serde")]
    pub fn log_json(self, label: impl Into<String>) -> Self
    where
        T: serde::Serialize,
    {
        let label = label.into();
        self.tap(move |value| match serde_json::to_string(value) {
            Ok(json) => tracing::info!(label = %label, json = %json, "value"),
            Err(error) => tracing::warn!(label = %label, %error, "value is not serializable"),
        })
    }
}
