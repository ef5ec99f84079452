/// Default page size of list endpoints.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Number of sessions plotted on the dashboard chart.
pub const CHART_WINDOW: usize = 10;

/// One score per second over a one-hour mock interview.
pub const MAX_MOCK_SESSION_SAMPLES: usize = 3600;

pub const MAX_USER_ID_LEN: usize = 128;

/// Default request body limit. Base64 inflates a frame by a third.
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;
