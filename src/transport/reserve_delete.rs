use super::lines::{ReservedFields, parse_int, parse_lines};
use crate::domain::{MessageId, ReserveDelete, ReserveDeleteResult};

pub fn encode_reserve_delete_form(request: &ReserveDelete) -> Vec<(String, String)> {
    let msgid = match request {
        ReserveDelete::Ids(ids) => ids
            .iter()
            .map(MessageId::as_str)
            .collect::<Vec<_>>()
            .join(";"),
        ReserveDelete::All => ReserveDelete::ALL.to_owned(),
    };
    vec![(ReserveDelete::FIELD.to_owned(), msgid)]
}

/// Decode a delete reply. Every non-reserved line is a message id → status code pair.
pub fn decode_reserve_delete_response(body: &[u8]) -> ReserveDeleteResult {
    let parsed = parse_lines(body);
    let mut reserved = ReservedFields::default();
    let statuses = parsed
        .lines
        .iter()
        .filter(|line| !reserved.absorb(line))
        .map(|line| (line.key.to_owned(), parse_int::<i32>(line.value)))
        .collect();

    ReserveDeleteResult {
        error_code: reserved.error_code,
        remaining_quota: reserved.remaining_quota,
        statuses,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::domain::ErrorCode;

    use super::*;

    #[test]
    fn encode_wildcard_delete() {
        assert_eq!(
            encode_reserve_delete_form(&ReserveDelete::all()),
            vec![("msgid".to_owned(), "all".to_owned())]
        );
    }

    #[test]
    fn encode_listed_ids() {
        let request = ReserveDelete::ids(vec![
            MessageId::new("m1").unwrap(),
            MessageId::new("m2").unwrap(),
        ])
        .unwrap();
        assert_eq!(
            encode_reserve_delete_form(&request),
            vec![("msgid".to_owned(), "m1;m2".to_owned())]
        );
    }

    #[test]
    fn decode_statuses_with_numeric_fallback() {
        let result = decode_reserve_delete_response(b"ErrorCode=0\nLCount=7\nm1=0\nm2=-1\nm3=gone");
        assert_eq!(
            result,
            ReserveDeleteResult {
                error_code: ErrorCode::new(0),
                remaining_quota: 7,
                statuses: BTreeMap::from([
                    ("m1".to_owned(), 0),
                    ("m2".to_owned(), -1),
                    ("m3".to_owned(), 0),
                ]),
            }
        );
    }
}
