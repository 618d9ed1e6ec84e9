use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::model::Notification;

/// Receives the toasts a form wants to show to the user.
///
/// Delivery is fire-and-forget: the form never retries.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        info!(
            title = %notification.title,
            description = %notification.description,
            "notification"
        );
    }
}

/// Forwards notifications to a channel, e.g. one drained by a UI task.
impl NotificationSink for UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        if self.send(notification).is_err() {
            warn!("notification receiver dropped");
        }
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}
