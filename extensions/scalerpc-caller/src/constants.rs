use std::time::Duration;

/// Applied by [`SectionDispatcher`](crate::SectionDispatcher) to calls,
/// subscription acks and unsubscribe calls unless overridden.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// How many closed subscription ids a connection remembers so that a repeated
/// stop still answers `true`. Older ids are forgotten first.
pub const RETIRED_SUBSCRIPTION_HISTORY: usize = 1024;
