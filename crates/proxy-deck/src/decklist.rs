use crate::types::Result;
use std::path::Path;

/// One parsed line of a deck list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckListLine {
    pub quantity: u32,
    pub name: String,
    /// Set code given in square brackets, if any
    pub set: Option<String>,
}

/// Parse a deck list in MTGA-style notation.
///
/// Each non-blank line reads `[quantity ]name[ [set-code]]`. The name stops at
/// the first `<` or `[`. Lines that do not fit are dropped.
pub fn parse_deck_list(text: &str) -> Vec<DeckListLine> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect()
}

/// Read and parse a deck list file
pub async fn load_deck_list(path: impl AsRef<Path>) -> Result<Vec<DeckListLine>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let lines = tokio::task::spawn_blocking(move || parse_deck_list(&contents)).await?;

    Ok(lines)
}

fn parse_line(line: &str) -> Option<DeckListLine> {
    let line = line.trim_start();

    let (quantity, rest) = match split_quantity(line) {
        Some((digits, rest)) => (digits.parse::<u32>().ok()?, rest),
        None => (1, line),
    };

    let name_end = rest.find(['<', '[']).unwrap_or(rest.len());
    let name = rest[..name_end].trim();
    if name.is_empty() {
        return None;
    }

    Some(DeckListLine {
        quantity,
        name: name.to_string(),
        set: find_set_code(&rest[name_end..]),
    })
}

/// Split a leading run of digits followed by whitespace off the line
fn split_quantity(line: &str) -> Option<(&str, &str)> {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }

    let rest = &line[digits_end..];
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }

    Some((&line[..digits_end], trimmed))
}

/// First non-empty `[...]` group in the text
fn find_set_code(text: &str) -> Option<String> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('[') {
        let open = search_from + offset;
        let inner = &text[open + 1..];
        if let Some(close) = inner.find(']') {
            let code = inner[..close].trim();
            if !code.is_empty() {
                return Some(code.to_string());
            }
        } else {
            return None;
        }
        search_from = open + 1;
    }

    None
}
