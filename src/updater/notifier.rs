use log::{info, warn};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::types::VersionInfo;

/// Receives "update available" notifications from the update manager.
pub trait UpdateNotifier: Send + Sync {
    fn notify_update_available(&self, version_info: &VersionInfo);
}

/// Writes the notification to the log. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl UpdateNotifier for LogNotifier {
    fn notify_update_available(&self, version_info: &VersionInfo) {
        info!(
            "New version available: {} {}",
            version_info.version, version_info.notes
        );
    }
}

/// Forwards notifications to a channel so a UI task can present them.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<VersionInfo>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<VersionInfo>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl UpdateNotifier for ChannelNotifier {
    fn notify_update_available(&self, version_info: &VersionInfo) {
        if self.tx.send(version_info.clone()).is_err() {
            warn!(
                "Update notification for {} dropped, no receiver",
                version_info.version
            );
        }
    }
}
