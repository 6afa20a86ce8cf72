use encoding_rs::BIG5;

/// Decode a Big5 field from the gateway into a `String`.
///
/// Malformed input never fails the surrounding parse: the bytes are kept as lossy UTF-8
/// instead, so one bad cell costs that cell and nothing else.
pub fn decode_big5(bytes: &[u8]) -> String {
    match BIG5.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text.into_owned(),
        None => {
            tracing::debug!(len = bytes.len(), "field is not valid Big5, keeping raw text");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
