pub const RESIZED_PREFIX: &str = "resized-";

/// Destination key for a source key. Pure prefix concatenation: the same
/// source key always maps to the same destination key.
pub fn destination_key(source_key: &str) -> String {
    format!("{}{}", RESIZED_PREFIX, source_key)
}

pub fn confirmation_message(destination_key: &str) -> String {
    format!("Resized image saved as {}", destination_key)
}
