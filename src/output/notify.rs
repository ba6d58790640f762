use tracing::{error, info, warn};

/// One user-facing notification emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A render completed and the payload was handed to the file sink.
    Success,
    /// The operator aborted the in-flight request.
    UserCancelled,
    /// The deadline elapsed with no response.
    Timeout,
    /// The request failed for any other reason.
    Failure(String),
    /// Informational message, for example an endpoint switch.
    Info(String),
}

/// Receives notices and presents them. The engine never blocks on a
/// notifier and never inspects the result of a notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that forwards notices to the tracing subscriber.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success => info!("download completed successfully"),
            Notice::UserCancelled => warn!("download cancelled by user"),
            Notice::Timeout => error!("render request timed out"),
            Notice::Failure(msg) => error!("{}", msg),
            Notice::Info(msg) => info!("{}", msg),
        }
    }
}
