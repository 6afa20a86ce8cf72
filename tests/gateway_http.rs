use messagenet::{
    Credential, ErrorCode, GatewayError, MessageId, MessageNetClient, MessageText, QueryLog,
    Recipient, ReserveDelete, SendOptions, SendSms,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MessageNetClient {
    MessageNetClient::builder(Credential::new("acct", "secret").unwrap())
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn send_posts_url_encoded_form_and_parses_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send.php"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("id=acct"))
        .and(body_string_contains("password=secret"))
        .and(body_string_contains("tel=0911111111%3B0922222222"))
        .and(body_string_contains("encoding=urlencode_utf8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("ErrorCode=0\nLCount=98\n0911111111=a1\n0922222222=a2\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = SendSms::new(
        vec![
            Recipient::new("0911111111").unwrap(),
            Recipient::new("0922222222").unwrap(),
        ],
        MessageText::new("hi").unwrap(),
        SendOptions::default(),
    );
    let result = client_for(&server).send(request).await;

    assert!(result.is_complete());
    let outcome = result.chunks[0].result.as_ref().unwrap();
    assert_eq!(outcome.error_code, ErrorCode::new(0));
    assert_eq!(outcome.remaining_quota, 98);
    assert_eq!(outcome.message_ids.len(), 2);
}

#[tokio::test]
async fn send_parses_every_chunk_even_with_error_status() {
    let server = MockServer::start().await;
    // Second chunk starts at recipient 100.
    Mock::given(method("POST"))
        .and(path("/send.php"))
        .and(body_string_contains("tel=0900000100"))
        .respond_with(ResponseTemplate::new(502).set_body_string("ErrorCode=-9\nLCount=4\n"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/send.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ErrorCode=0\nLCount=1\n"))
        .expect(2)
        .mount(&server)
        .await;

    let recipients = (0..250)
        .map(|i| Recipient::new(format!("09{i:08}")).unwrap())
        .collect();
    let request = SendSms::new(
        recipients,
        MessageText::new("hi").unwrap(),
        SendOptions::default(),
    );
    let result = client_for(&server).send(request).await;

    assert!(result.is_complete());
    let codes = result
        .outcomes()
        .map(|o| o.map(|o| o.error_code))
        .collect::<Vec<_>>();
    assert_eq!(
        codes,
        vec![
            Some(ErrorCode::new(0)),
            Some(ErrorCode::new(-9)),
            Some(ErrorCode::new(0))
        ]
    );
    assert_eq!(result.chunks[1].result.as_ref().unwrap().remaining_quota, 4);
}

#[tokio::test]
async fn query_log_decodes_big5_cells_from_raw_body() {
    let server = MockServer::start().await;
    let mut body = b"ErrorCode=0\nLCount=12\ncaption=\"mid\",\"msg\"\nitem1=\"m1\",\"".to_vec();
    body.extend_from_slice(&[0xA4, 0xA4, 0xA4, 0xE5]);
    body.extend_from_slice(b"\"\n");

    Mock::given(method("POST"))
        .and(path("/query.php"))
        .and(body_string_contains("mid=m1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(&server)
        .await;

    let request = QueryLog::new().message_ids(vec![MessageId::new("m1").unwrap()]);
    let result = client_for(&server).query_log(request).await.unwrap();

    assert_eq!(result.remaining_quota, 12);
    let entry = &result.entries["item1"];
    assert_eq!(entry.row_id, "1");
    assert_eq!(entry.get("mid"), Some("m1"));
    assert_eq!(entry.get("msg"), Some("中文"));
}

#[tokio::test]
async fn reserve_delete_all_hits_delete_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/del.php"))
        .and(body_string_contains("msgid=all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ErrorCode=0\nLCount=3\n"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .reserve_delete(ReserveDelete::all())
        .await
        .unwrap();
    assert!(result.error_code.is_success());
    assert_eq!(result.remaining_quota, 3);
    assert!(result.statuses.is_empty());
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_error() {
    let client = MessageNetClient::builder(Credential::new("acct", "secret").unwrap())
        .base_url("http://127.0.0.1:1/")
        .build()
        .unwrap();

    let err = client.query_log(QueryLog::new()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}
