/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifiers issued by the remote inventory backend (lots, blocks,
/// factories, organizations). Opaque strings on this side.
pub type RemoteId = String;
