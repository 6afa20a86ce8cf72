use super::LONG_SMS_FIELD;
use super::lines::{ReservedFields, parse_lines};
use super::table::TableAssembler;
use crate::domain::{MessageId, QueryLog, QueryLogResult};

pub fn encode_query_log_form(request: &QueryLog) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    if request.long_sms_mode() != 0 {
        params.push((LONG_SMS_FIELD.to_owned(), request.long_sms_mode().to_string()));
    }
    if !request.column_names().is_empty() {
        params.push(("columns".to_owned(), request.column_names().join(";")));
    }
    if let Some(date) = request.start() {
        params.push(("startdate".to_owned(), date.as_str().to_owned()));
    }
    if let Some(date) = request.end() {
        params.push(("enddate".to_owned(), date.as_str().to_owned()));
    }
    if request.index() != 0 {
        params.push(("sindex".to_owned(), request.index().to_string()));
    }
    if let Some(count) = request.effective_max_count() {
        params.push(("mcount".to_owned(), count.to_string()));
    }
    if !request.ids().is_empty() {
        let mid = request
            .ids()
            .iter()
            .map(MessageId::as_str)
            .collect::<Vec<_>>()
            .join(";");
        params.push(("mid".to_owned(), mid));
    }

    params
}

/// Decode a log query reply: reserved fields plus the caption/row table.
///
/// Keys that are neither reserved nor part of the table are ignored.
pub fn decode_query_log_response(body: &[u8]) -> QueryLogResult {
    let parsed = parse_lines(body);
    let mut reserved = ReservedFields::default();
    let mut table = TableAssembler::new();

    for line in &parsed.lines {
        if !reserved.absorb(line) && !table.absorb(line) {
            tracing::debug!(key = line.key, "ignoring unexpected query log key");
        }
    }
    if parsed.skipped > 0 || table.dropped_rows() > 0 {
        tracing::debug!(
            skipped_lines = parsed.skipped,
            dropped_rows = table.dropped_rows(),
            "query log reply was partially malformed"
        );
    }

    QueryLogResult {
        error_code: reserved.error_code,
        remaining_quota: reserved.remaining_quota,
        entries: table.into_entries(),
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{ErrorCode, GatewayDate};

    use super::*;

    #[test]
    fn encode_default_query_sends_nothing_extra() {
        assert!(encode_query_log_form(&QueryLog::new()).is_empty());
    }

    #[test]
    fn encode_all_filters() {
        let request = QueryLog::new()
            .long_sms(2)
            .columns(["msg", "tel"])
            .start_date(GatewayDate::new("20260101").unwrap())
            .end_date(GatewayDate::new("20260131").unwrap())
            .start_index(20)
            .max_count(50)
            .message_ids(vec![
                MessageId::new("m1").unwrap(),
                MessageId::new("m2").unwrap(),
            ]);

        assert_eq!(
            encode_query_log_form(&request),
            vec![
                ("longsms".to_owned(), "2".to_owned()),
                ("columns".to_owned(), "msg;tel".to_owned()),
                ("startdate".to_owned(), "20260101".to_owned()),
                ("enddate".to_owned(), "20260131".to_owned()),
                ("sindex".to_owned(), "20".to_owned()),
                ("mcount".to_owned(), "50".to_owned()),
                ("mid".to_owned(), "m1;m2".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_omits_protocol_default_count() {
        let params = encode_query_log_form(&QueryLog::new().max_count(1000));
        assert!(!params.iter().any(|(k, _)| k == "mcount"));
    }

    #[test]
    fn decode_reply_with_table() {
        let body = b"ErrorCode=0\nLCount=88\ncaption=\"id\",\"msg\"\nitem1=\"10\",\"hello\"\nitem2=\"11\",\"\xA4\xA4\xA4\xE5\"\n";
        let result = decode_query_log_response(body);

        assert_eq!(result.error_code, ErrorCode::new(0));
        assert_eq!(result.remaining_quota, 88);
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries["item1"].row_id, "1");
        assert_eq!(result.entries["item1"].get("id"), Some("10"));
        assert_eq!(result.entries["item1"].get("msg"), Some("hello"));
        assert_eq!(result.entries["item2"].get("msg"), Some("中文"));
    }

    #[test]
    fn decode_drops_incomplete_rows() {
        let result = decode_query_log_response(b"caption=\"id\",\"msg\"\nitem1=\"10\"");
        assert!(result.entries.is_empty());
    }

    #[test]
    fn decode_error_reply_without_table() {
        let result = decode_query_log_response(b"ErrorCode=-2\nLCount=0\n");
        assert_eq!(result.error_code, ErrorCode::new(-2));
        assert!(result.entries.is_empty());
    }
}
