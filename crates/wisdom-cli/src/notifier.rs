//! Terminal notification platform.

use std::io::{BufRead, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Local;
use wisdom_core::error::Result;
use wisdom_core::notification::{NotificationPlatform, PermissionStatus};

/// Prints reminders to stdout.
///
/// Permission is per process: it starts at whatever the command decided
/// and `request_permission` asks on the terminal.
pub struct ConsoleNotificationPlatform {
    status: Mutex<PermissionStatus>,
}

impl ConsoleNotificationPlatform {
    pub fn new(status: PermissionStatus) -> Self {
        Self {
            status: Mutex::new(status),
        }
    }

    fn set_status(&self, status: PermissionStatus) {
        if let Ok(mut current) = self.status.lock() {
            *current = status;
        }
    }
}

#[async_trait]
impl NotificationPlatform for ConsoleNotificationPlatform {
    async fn request_permission(&self) -> PermissionStatus {
        let answer = tokio::task::spawn_blocking(|| {
            print!("Permitir lembretes diários? [s/N] ");
            std::io::stdout().flush().ok()?;
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).ok()?;
            Some(line)
        })
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

        let status = match answer.trim().to_lowercase().as_str() {
            "s" | "sim" | "y" | "yes" => PermissionStatus::Granted,
            _ => PermissionStatus::Denied,
        };
        self.set_status(status);
        status
    }

    fn permission_status(&self) -> PermissionStatus {
        self.status
            .lock()
            .map(|status| *status)
            .unwrap_or(PermissionStatus::Undetermined)
    }

    fn emit(&self, title: &str, body: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "[{}] {title}: {body}", Local::now().format("%H:%M"))?;
        stdout.flush()?;
        Ok(())
    }
}
