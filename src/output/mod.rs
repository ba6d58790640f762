// Notification and file delivery seams, with tracing- and disk-backed defaults.

pub mod notify;
pub mod sink;
