/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fresh record ID (UUID v4, string form).
///
/// IDs are generated at the route/sequencer layer; the persistence layer
/// only requires them to be unique within a namespace.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
