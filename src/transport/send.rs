use super::lines::{ReservedFields, parse_lines};
use super::{ENCODING_FIELD, LONG_SMS_FIELD, URLENCODE_UTF8};
use crate::domain::{MessageText, Recipient, SendOptions, SendOutcome, SendSms};

const SEND_DATE_FIELD: &str = "sdate";

/// Form params for one recipient chunk of `request` (credentials excluded).
pub fn encode_send_form(request: &SendSms, chunk: &[Recipient]) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    push_options(&mut params, request.options());

    let tel = chunk
        .iter()
        .map(Recipient::raw)
        .collect::<Vec<_>>()
        .join(";");
    params.push((Recipient::FIELD.to_owned(), tel));
    params.push((MessageText::FIELD.to_owned(), request.msg().as_str().to_owned()));
    params.push((ENCODING_FIELD.to_owned(), URLENCODE_UTF8.to_owned()));
    params
}

fn push_options(params: &mut Vec<(String, String)>, options: &SendOptions) {
    if options.long_sms != 0 {
        params.push((LONG_SMS_FIELD.to_owned(), options.long_sms.to_string()));
    }
    if let Some(date) = options.send_date.as_ref() {
        params.push((SEND_DATE_FIELD.to_owned(), date.as_str().to_owned()));
    }
}

/// Decode a send reply. Every non-reserved line is a recipient → message id pair.
pub fn decode_send_response(body: &[u8]) -> SendOutcome {
    let parsed = parse_lines(body);
    let mut reserved = ReservedFields::default();
    let message_ids = parsed
        .lines
        .iter()
        .filter(|line| !reserved.absorb(line))
        .map(|line| (line.key.to_owned(), line.value_text().into_owned()))
        .collect();

    SendOutcome {
        error_code: reserved.error_code,
        remaining_quota: reserved.remaining_quota,
        message_ids,
    }
}
