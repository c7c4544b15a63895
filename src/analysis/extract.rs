//! Best-effort move list extraction from analysis responses.

use serde::Deserialize;

#[derive(Deserialize)]
struct MoveList {
    moves: Vec<String>,
}

/// Pulls the list of suggested moves out of a response body.
///
/// Understands a JSON object with a `moves` array of strings, and the
/// ChessDB text format `move:h2e2,score:1,...|move:b2e2,...`. Anything else
/// yields an empty list.
pub fn extract_moves(body: &str) -> Vec<String> {
    let body = body.trim_matches(|c: char| c.is_whitespace() || c == '\0');

    if body.starts_with('{') {
        return serde_json::from_str::<MoveList>(body)
            .map(|list| list.moves)
            .unwrap_or_default();
    }

    body.split('|')
        .filter_map(|record| {
            record
                .split(',')
                .find_map(|field| field.trim().strip_prefix("move:"))
        })
        .map(str::trim)
        .filter(|mv| !mv.is_empty())
        .map(str::to_string)
        .collect()
}
