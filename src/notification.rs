// Best-effort user notifications for booking confirmations and chat replies

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    // Not asked yet
    #[default]
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
}

// Whatever actually puts a notification in front of the user
pub trait NotificationBackend: Send + Sync + 'static {
    fn is_supported(&self) -> bool;

    fn permission(&self) -> Permission;

    // Ask the user; returns the resulting permission
    fn request_permission(&self) -> Permission;

    fn show(&self, notification: &Notification);
}

// Backend that delivers notifications as structured log events.
// `grant_on_request` decides how the simulated permission prompt is answered.
pub struct TracingBackend {
    supported: bool,
    grant_on_request: bool,
    permission: Mutex<Permission>,
}

impl TracingBackend {
    pub fn new(supported: bool, grant_on_request: bool) -> Self {
        Self {
            supported,
            grant_on_request,
            permission: Mutex::new(Permission::Default),
        }
    }
}

impl NotificationBackend for TracingBackend {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn permission(&self) -> Permission {
        *self.permission.lock()
    }

    fn request_permission(&self) -> Permission {
        let mut permission = self.permission.lock();
        *permission = if self.grant_on_request {
            Permission::Granted
        } else {
            Permission::Denied
        };
        *permission
    }

    fn show(&self, notification: &Notification) {
        tracing::info!(
            title = %notification.title,
            body = %notification.body,
            icon = %notification.icon,
            "Notification"
        );
    }
}

pub struct NotificationGateway {
    backend: Box<dyn NotificationBackend>,
    icon: String,
    permission_requested: AtomicBool,
}

impl NotificationGateway {
    pub fn new(backend: Box<dyn NotificationBackend>, icon: impl Into<String>) -> Self {
        Self {
            backend,
            icon: icon.into(),
            permission_requested: AtomicBool::new(false),
        }
    }

    // Ask for permission at most once per gateway. Never asks again after a denial.
    pub fn request_permission_once(&self) -> Permission {
        if !self.backend.is_supported() {
            return Permission::Denied;
        }
        if self.permission_requested.swap(true, Ordering::SeqCst) {
            return self.backend.permission();
        }

        match self.backend.permission() {
            Permission::Denied => Permission::Denied,
            _ => {
                let permission = self.backend.request_permission();
                tracing::debug!(?permission, "Notification permission requested");
                permission
            }
        }
    }

    // Silent no-op unless supported and granted; returns whether it was shown
    pub fn notify(&self, title: &str, body: &str) -> bool {
        if !self.backend.is_supported() || self.backend.permission() != Permission::Granted {
            return false;
        }

        self.backend.show(&Notification {
            title: title.to_string(),
            body: body.to_string(),
            icon: self.icon.clone(),
        });
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    // Records everything shown; shared handle lets tests inspect it after the gateway owns it
    #[derive(Clone, Default)]
    pub struct RecordingBackend {
        pub inner: Arc<RecordingState>,
    }

    #[derive(Default)]
    pub struct RecordingState {
        pub supported: AtomicBool,
        pub grant: AtomicBool,
        pub permission: Mutex<Permission>,
        pub requests: AtomicUsize,
        pub shown: Mutex<Vec<Notification>>,
    }

    impl RecordingBackend {
        pub fn new(supported: bool, grant: bool) -> Self {
            let backend = Self::default();
            backend.inner.supported.store(supported, Ordering::SeqCst);
            backend.inner.grant.store(grant, Ordering::SeqCst);
            backend
        }

        pub fn granted() -> Self {
            let backend = Self::new(true, true);
            *backend.inner.permission.lock() = Permission::Granted;
            backend
        }

        pub fn shown(&self) -> Vec<Notification> {
            self.inner.shown.lock().clone()
        }

        pub fn requests(&self) -> usize {
            self.inner.requests.load(Ordering::SeqCst)
        }
    }

    impl NotificationBackend for RecordingBackend {
        fn is_supported(&self) -> bool {
            self.inner.supported.load(Ordering::SeqCst)
        }

        fn permission(&self) -> Permission {
            *self.inner.permission.lock()
        }

        fn request_permission(&self) -> Permission {
            self.inner.requests.fetch_add(1, Ordering::SeqCst);
            let mut permission = self.inner.permission.lock();
            *permission = if self.inner.grant.load(Ordering::SeqCst) {
                Permission::Granted
            } else {
                Permission::Denied
            };
            *permission
        }

        fn show(&self, notification: &Notification) {
            self.inner.shown.lock().push(notification.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::*;

    #[test]
    fn test_permission_requested_only_once() {
        let backend = RecordingBackend::new(true, true);
        let gateway = NotificationGateway::new(Box::new(backend.clone()), "icon.png");

        assert_eq!(gateway.request_permission_once(), Permission::Granted);
        assert_eq!(gateway.request_permission_once(), Permission::Granted);
        assert_eq!(backend.requests(), 1);
    }

    #[test]
    fn test_denied_permission_is_not_re_requested() {
        let backend = RecordingBackend::new(true, true);
        *backend.inner.permission.lock() = Permission::Denied;
        let gateway = NotificationGateway::new(Box::new(backend.clone()), "icon.png");

        assert_eq!(gateway.request_permission_once(), Permission::Denied);
        assert_eq!(backend.requests(), 0);
        assert!(!gateway.notify("title", "body"));
    }

    #[test]
    fn test_notify_without_permission_is_silent() {
        let backend = RecordingBackend::new(true, false);
        let gateway = NotificationGateway::new(Box::new(backend.clone()), "icon.png");

        assert!(!gateway.notify("before asking", "body"));
        gateway.request_permission_once();
        assert!(!gateway.notify("after denial", "body"));
        assert!(backend.shown().is_empty());
    }

    #[test]
    fn test_unsupported_backend_never_asks() {
        let backend = RecordingBackend::new(false, true);
        let gateway = NotificationGateway::new(Box::new(backend.clone()), "icon.png");

        assert_eq!(gateway.request_permission_once(), Permission::Denied);
        assert_eq!(backend.requests(), 0);
        assert!(!gateway.notify("title", "body"));
    }

    #[test]
    fn test_granted_notification_is_shown() {
        let backend = RecordingBackend::granted();
        let gateway = NotificationGateway::new(Box::new(backend.clone()), "icon.png");

        assert!(gateway.notify("Booking Confirmed!", "See you there"));
        assert_eq!(
            backend.shown(),
            vec![Notification {
                title: "Booking Confirmed!".to_string(),
                body: "See you there".to_string(),
                icon: "icon.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_tracing_backend_answers_prompt() {
        let gateway = NotificationGateway::new(Box::new(TracingBackend::new(true, true)), "");
        assert!(!gateway.notify("not yet", ""));
        assert_eq!(gateway.request_permission_once(), Permission::Granted);
        assert!(gateway.notify("now", ""));
    }
}
