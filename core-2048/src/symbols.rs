/// Display string for a stored rank. Ranks past what a `u64` holds fall back
/// to exponent notation.
pub fn tile_symbol(rank: u8) -> String {
    match rank {
        0 => " ".to_owned(),
        1..=63 => (1u64 << rank).to_string(),
        _ => format!("2^{rank}"),
    }
}

/// Like `tile_symbol`, with negative ranks shown as the `??` wildcard.
pub fn symbol(rank: i8) -> String {
    u8::try_from(rank).map_or_else(|_| "??".to_owned(), tile_symbol)
}
