//! Argument-logging decorator

use super::Func;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::info;

/// Prefix of every record produced by [`log`] and [`log_with`]
pub const LOG_PREFIX: &str = "Computing for argument(s):";

/// Wrap `f` so each call emits an `info` record with its arguments first
pub fn log<A, R>(f: Func<A, R>) -> Func<A, R>
where
    A: Debug + 'static,
    R: 'static,
{
    log_with(f, |record| info!("{record}"))
}

/// Wrap `f` so each call hands its rendered arguments to `sink` first
///
/// The wrapped function's result is returned unchanged.
pub fn log_with<A, R, S>(f: Func<A, R>, sink: S) -> Func<A, R>
where
    A: Debug + 'static,
    R: 'static,
    S: Fn(&str) + Send + Sync + 'static,
{
    Arc::new(move |args: A| {
        sink(&format!("{LOG_PREFIX} {args:?}"));
        f(args)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::func;
    use std::sync::Mutex;

    fn recording_sink() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink_records = records.clone();
        let sink = move |record: &str| sink_records.lock().unwrap().push(record.to_string());
        (records, sink)
    }

    #[test]
    fn test_log_with_records_before_delegating() {
        let (records, sink) = recording_sink();
        let seen_at_call = Arc::new(Mutex::new(0));
        let seen = seen_at_call.clone();
        let probe = records.clone();

        let add = log_with(
            func(move |(x, y): (i32, i32)| {
                *seen.lock().unwrap() = probe.lock().unwrap().len();
                x + y
            }),
            sink,
        );

        assert_eq!(add((16, 10)), 26);
        assert_eq!(*seen_at_call.lock().unwrap(), 1);
        assert_eq!(
            *records.lock().unwrap(),
            vec!["Computing for argument(s): (16, 10)".to_string()]
        );
    }

    #[test]
    fn test_log_with_one_record_per_call() {
        let (records, sink) = recording_sink();
        let echo = log_with(func(|x: String| x), sink);

        assert_eq!(echo("a".to_string()), "a");
        assert_eq!(echo("b".to_string()), "b");

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[1].ends_with("\"b\""));
    }

    #[test]
    fn test_log_returns_result_unchanged() {
        let sqrt = log(func(f64::sqrt));
        assert_eq!(sqrt(16.0), 4.0);
    }
}
