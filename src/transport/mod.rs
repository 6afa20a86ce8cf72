//! Transport layer: form encoding and the gateway's `key=value` reply format.

mod legacy_text;
mod lines;
mod query_log;
mod reserve_delete;
mod send;
mod table;

pub use query_log::{decode_query_log_response, encode_query_log_form};
pub use reserve_delete::{decode_reserve_delete_response, encode_reserve_delete_form};
pub use send::{decode_send_response, encode_send_form};

const LONG_SMS_FIELD: &str = "longsms";
const ENCODING_FIELD: &str = "encoding";
const URLENCODE_UTF8: &str = "urlencode_utf8";
