use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use wisdom_application::NotificationScheduler;
use wisdom_core::clock::SystemClock;
use wisdom_core::notification::PermissionStatus;

use crate::app::App;
use crate::notifier::ConsoleNotificationPlatform;

/// Runs the reminder scheduler until Ctrl-C.
pub async fn run(app: &App) -> Result<()> {
    let state = app.progress.load();
    if !state.notifications_enabled {
        println!("Lembretes desativados. Ative com `wisdom notify on` em outro terminal.");
    } else {
        println!("Aguardando o lembrete das {}. Ctrl-C para sair.", state.notification_time);
    }

    // Running `watch` in a terminal is the user's consent to see reminders there.
    let scheduler = NotificationScheduler::new(
        Arc::new(ConsoleNotificationPlatform::new(PermissionStatus::Granted)),
        Arc::new(SystemClock),
    )
    .with_tick_interval(app.config.scheduler.tick_interval());

    let shutdown = CancellationToken::new();
    let ctrl_c = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("interrupt received"),
                Err(e) => warn!(error = %e, "failed to listen for interrupt"),
            }
            shutdown.cancel();
        })
    };

    // `notify on|off` runs in its own process; poll storage to see it.
    tokio::join!(
        scheduler.run(app.progress.subscribe(), shutdown.clone()),
        scheduler.follow_persisted(&app.progress, shutdown),
    );
    ctrl_c.abort();
    Ok(())
}
