//! Terminal rendering of content and progress.

use std::io::IsTerminal;

use wisdom_core::content::{DailyContent, TextSpan, parse_bold_spans};
use wisdom_core::progress::{Theme, UserState};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// ANSI styling, disabled when stdout is not a terminal.
pub struct Style {
    ansi: bool,
    accent: &'static str,
}

impl Style {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            ansi: std::io::stdout().is_terminal(),
            accent: match theme {
                Theme::Light => "\x1b[34m",
                Theme::Dark => "\x1b[33m",
            },
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.ansi {
            format!("{BOLD}{}{text}{RESET}", self.accent)
        } else {
            text.to_string()
        }
    }

    /// Renders `**bold**` spans.
    pub fn rich(&self, text: &str) -> String {
        parse_bold_spans(text)
            .into_iter()
            .map(|span| match span {
                TextSpan::Plain(t) => t.to_string(),
                TextSpan::Bold(t) if self.ansi => format!("{BOLD}{t}{RESET}"),
                TextSpan::Bold(t) => t.to_string(),
            })
            .collect()
    }
}

pub fn print_content(content: &DailyContent, state: &UserState) {
    let style = Style::for_theme(state.theme);
    let day = content.day;

    let mut markers = Vec::new();
    if state.is_completed(day) {
        markers.push("concluído");
    }
    if state.is_favorite(day) {
        markers.push("favorito");
    }
    let markers = if markers.is_empty() {
        String::new()
    } else {
        format!(" ({})", markers.join(", "))
    };

    println!("{}{markers}", style.heading(&format!("Dia {day} · {}", content.scripture_reference)));
    println!();
    for verse in &content.scripture_verses {
        println!("{:>3}  {}", verse.verse, verse.text);
    }

    println!();
    println!("{}", style.heading("Interpretação"));
    println!("{}", style.rich(&content.interpretation));

    println!();
    println!("{}", style.heading("Passos práticos"));
    for (i, step) in content.practical_steps.iter().enumerate() {
        println!("{}. {}", i + 1, style.rich(step));
    }

    println!();
    println!("{}", style.heading("Reflexão"));
    println!("{}", style.rich(&content.reflection_question));

    println!();
    println!("{}", style.heading("Curiosidade histórica"));
    println!("{}", style.rich(&content.historical_curiosity));

    if let Some(entry) = state.journal_entry(day) {
        println!();
        println!("{}", style.heading("Seu diário"));
        println!("{entry}");
    }
}

/// `1, 4, 9` or `-` when empty.
pub fn day_list<'a>(days: impl IntoIterator<Item = &'a wisdom_core::Day>) -> String {
    let list: Vec<String> = days.into_iter().map(ToString::to_string).collect();
    if list.is_empty() {
        "-".to_string()
    } else {
        list.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisdom_core::Day;

    #[test]
    fn test_rich_without_ansi_drops_markers() {
        let style = Style {
            ansi: false,
            accent: "",
        };
        assert_eq!(style.rich("Confie no **Senhor** sempre"), "Confie no Senhor sempre");
    }

    #[test]
    fn test_rich_with_ansi_wraps_bold() {
        let style = Style {
            ansi: true,
            accent: "",
        };
        assert_eq!(style.rich("a **b**"), "a \x1b[1mb\x1b[0m");
    }

    #[test]
    fn test_day_list() {
        let days = [Day::new(1).unwrap(), Day::new(9).unwrap()];
        assert_eq!(day_list(&days), "1, 9");
        assert_eq!(day_list(&Vec::<Day>::new()), "-");
    }
}
