//! Day navigation, completion and favorites.

use anyhow::Result;
use wisdom_core::Day;
use wisdom_core::CURRICULUM_DAYS;
use wisdom_core::progress::operations::suggests_next_day;

use super::render::day_list;
use crate::app::App;

pub fn advance(app: &App) {
    let before = app.progress.load().current_day;
    let state = app.progress.advance();
    if state.current_day == before {
        println!("Você já está no último dia ({}).", state.current_day);
    } else {
        println!("Dia {}", state.current_day);
    }
}

pub fn retreat(app: &App) {
    let before = app.progress.load().current_day;
    let state = app.progress.retreat();
    if state.current_day == before {
        println!("Você já está no primeiro dia.");
    } else {
        println!("Dia {}", state.current_day);
    }
}

pub fn goto(app: &App, day: i64) -> Result<()> {
    let state = app.progress.select_day(Day::new(day)?);
    println!("Dia {}", state.current_day);
    Ok(())
}

pub fn complete(app: &App, day: Option<i64>) -> Result<()> {
    let day = app.day_or_current(day)?;
    let state = app.progress.toggle_completed(day);

    if state.is_completed(day) {
        println!("Dia {day} concluído. {}% da jornada.", state.completion_percent());
        if suggests_next_day(&state, day) {
            if let Some(next) = day.next() {
                println!("Próximo: `wisdom goto {next}`");
            }
        }
    } else {
        println!("Dia {day} marcado como não concluído.");
    }
    Ok(())
}

pub fn favorite(app: &App, day: Option<i64>) -> Result<()> {
    let day = app.day_or_current(day)?;
    let state = app.progress.toggle_favorite(day);
    if state.is_favorite(day) {
        println!("Dia {day} adicionado aos favoritos.");
    } else {
        println!("Dia {day} removido dos favoritos.");
    }
    Ok(())
}

pub fn favorites(app: &App) {
    println!("Favoritos: {}", day_list(&app.progress.load().favorites));
}

pub fn status(app: &App) {
    let state = app.progress.load();
    let name = if state.name.is_empty() { "-" } else { state.name.as_str() };

    println!("Nome: {name}");
    println!("Dia atual: {}/{CURRICULUM_DAYS}", state.current_day);
    println!(
        "Concluídos: {} ({}%)",
        day_list(&state.completed_days),
        state.completion_percent()
    );
    println!("Favoritos: {}", day_list(&state.favorites));
    println!("Entradas no diário: {}", state.journal_entries.len());
    println!("Tema: {:?}", state.theme);
    println!(
        "Lembrete: {} às {}",
        if state.notifications_enabled { "ativo" } else { "desativado" },
        state.notification_time
    );
    println!(
        "Chave de API: {}",
        if state.custom_credential.is_some() {
            "própria"
        } else if app.secrets.default_credential().is_some() {
            "padrão"
        } else {
            "nenhuma"
        }
    );
    if !state.is_onboarded {
        println!("Comece com `wisdom onboard <NOME>`.");
    }
}
