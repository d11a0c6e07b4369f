use anyhow::{Result, bail};
use tracing::info;

use super::render;
use crate::app::App;

pub async fn show(app: &App, day: Option<i64>) -> Result<()> {
    let day = app.day_or_current(day)?;
    let credential = app.credential();

    match app.delivery.get_day(day, credential.as_deref()).await {
        Ok(content) => {
            render::print_content(&content, &app.progress.load());
            Ok(())
        }
        Err(e) => {
            info!(%day, error = %e, "content unavailable");
            eprintln!("{}", e.user_message());
            if e.needs_credential() {
                eprintln!("Use `wisdom credential set <KEY>` para informar sua chave.");
            } else if e.is_retryable() {
                eprintln!("Tente novamente com `wisdom show --day {day}`.");
            }
            bail!(e)
        }
    }
}
