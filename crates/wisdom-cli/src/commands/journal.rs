use anyhow::Result;

use crate::app::App;

pub fn write(app: &App, day: Option<i64>, text: &str) -> Result<()> {
    let day = app.day_or_current(day)?;
    let state = app.progress.write_journal(day, text);
    if state.journal_entry(day).is_some() {
        println!("Diário do dia {day} salvo.");
    } else {
        println!("Diário do dia {day} apagado.");
    }
    Ok(())
}

pub fn show(app: &App, day: Option<i64>) -> Result<()> {
    let day = app.day_or_current(day)?;
    match app.progress.load().journal_entry(day) {
        Some(entry) => println!("{entry}"),
        None => println!("Nenhuma entrada para o dia {day}."),
    }
    Ok(())
}

pub fn list(app: &App) {
    let state = app.progress.load();
    let mut empty = true;
    for (day, entry) in state.journal_newest_first() {
        empty = false;
        println!("Dia {day}: {entry}");
    }
    if empty {
        println!("O diário está vazio.");
    }
}
