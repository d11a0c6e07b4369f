//! Theme, reminders, onboarding, credential and reset.

use std::sync::Arc;

use anyhow::Result;
use wisdom_application::NotificationScheduler;
use wisdom_core::clock::SystemClock;
use wisdom_core::notification::PermissionStatus;
use wisdom_core::progress::{NotificationTime, Theme};

use crate::app::App;
use crate::notifier::ConsoleNotificationPlatform;

pub fn toggle_theme(app: &App) {
    let state = app.progress.toggle_theme();
    match state.theme {
        Theme::Light => println!("Tema claro."),
        Theme::Dark => println!("Tema escuro."),
    }
}

pub async fn notify_on(app: &App, time: Option<&str>, assume_yes: bool) -> Result<()> {
    let time = time.map(str::parse::<NotificationTime>).transpose()?;
    let initial = if assume_yes {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Undetermined
    };

    let scheduler = NotificationScheduler::new(
        Arc::new(ConsoleNotificationPlatform::new(initial)),
        Arc::new(SystemClock),
    );
    match scheduler.enable_reminders(&app.progress, time).await {
        PermissionStatus::Granted => {
            let state = app.progress.load();
            println!("Lembrete diário às {}.", state.notification_time);
            println!("Deixe `wisdom watch` rodando para recebê-lo.");
        }
        _ => println!("Lembretes desativados: permissão negada."),
    }
    Ok(())
}

pub fn notify_off(app: &App) {
    app.progress.set_notifications(false, None);
    println!("Lembretes desativados.");
}

pub fn onboard(app: &App, name: &str) -> Result<()> {
    let state = app.progress.complete_onboarding(name)?;
    println!("Bem-vindo(a), {}! Comece com `wisdom show`.", state.name);
    Ok(())
}

pub fn set_credential(app: &App, key: Option<&str>) {
    let state = app.progress.set_custom_credential(key);
    if state.custom_credential.is_some() {
        println!("Chave de API salva.");
    } else {
        println!("Chave de API removida.");
    }
}

pub fn reset(app: &App, include_content: bool) -> Result<()> {
    app.progress.reset();
    println!("Progresso apagado.");
    if include_content {
        let removed = app.cache.clear()?;
        println!("{removed} dia(s) em cache apagado(s).");
    }
    Ok(())
}
