//! Colaborador de notificaciones (toasts).
//!
//! Fire-and-forget: el controlador nunca consume un valor de retorno.
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, variant: NotificationVariant) -> Self {
        Self { title: title.into(),
               description: description.into(),
               variant }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Envía las notificaciones al facade `log`. Es el notificador por defecto.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: Notification) {
        match n.variant {
            NotificationVariant::Destructive => log::warn!("[notify] {}: {}", n.title, n.description),
            _ => log::info!("[notify] {}: {}", n.title, n.description),
        }
    }
}

/// Guarda las notificaciones en memoria (tests, CLI).
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    inner: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Vacía y devuelve lo acumulado.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).push(notification);
    }
}
