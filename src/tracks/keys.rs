const STATUS_PREFIX: &str = "tracks";

/// Ledger key of the list page at `offset` for `query`.
///
/// The offset is the last `:`-separated segment, so queries containing `:`
/// still produce distinct keys.
pub fn list_key(query: &str, offset: u32) -> String {
    format!("{STATUS_PREFIX}:list:{query}:{offset}")
}

/// Ledger key of the detail record for track `id`.
pub fn detail_key(id: &str) -> String {
    format!("{STATUS_PREFIX}:detail:{id}")
}
