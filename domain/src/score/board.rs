//! Leaderboard text

use super::score::Score;

/// Text for an empty leaderboard
pub const EMPTY_BOARD: &str = "Noch keine Einträge vorhanden.";

/// Name shown for players without a name
pub const ANONYMOUS: &str = "Anonym";

const BAR_CELLS: usize = 10;

/// Render ranked scores, two lines per entry
///
/// `entries` must already be sorted best first. With `length`, only that
/// many entries are rendered. With `html`, names are set in bold.
pub fn render(entries: &[(Option<String>, Score)], length: Option<usize>, html: bool) -> String {
    if entries.is_empty() {
        return EMPTY_BOARD.to_string();
    }
    let lines = length.filter(|l| *l > 0).unwrap_or(entries.len());
    let rank_width = lines.to_string().len();
    let left_offset = " ".repeat(rank_width + 2);

    entries
        .iter()
        .take(lines)
        .enumerate()
        .map(|(i, (name, score))| {
            let name = name.as_deref().unwrap_or(ANONYMOUS);
            let name = if html {
                format!("<b>{}:</b>", name)
            } else {
                format!("{}:", name)
            };
            let full = ((score.ratio() / 10.0).floor() as usize).min(BAR_CELLS);
            format!(
                "{:>width$}. {} {} / {}\n{}{}{}  {:5.2} %",
                i + 1,
                name,
                score.correct(),
                score.answers(),
                left_offset,
                "▬".repeat(full),
                "▭".repeat(BAR_CELLS - full),
                score.ratio(),
                width = rank_width,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
