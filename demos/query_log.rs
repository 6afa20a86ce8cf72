mod common;

use messagenet::{GatewayDate, MessageId, QueryLog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let client = common::client_from_env()?;

    let mut request = QueryLog::new()
        .columns(common::list_env("MESSAGENET_COLUMNS"))
        .message_ids(
            common::list_env("MESSAGENET_MESSAGE_IDS")
                .into_iter()
                .map(MessageId::new)
                .collect::<Result<Vec<_>, _>>()?,
        );
    if let Ok(start) = std::env::var("MESSAGENET_START_DATE") {
        request = request.start_date(GatewayDate::new(start)?);
    }
    if let Ok(end) = std::env::var("MESSAGENET_END_DATE") {
        request = request.end_date(GatewayDate::new(end)?);
    }
    if let Ok(count) = std::env::var("MESSAGENET_MAX_COUNT") {
        request = request.max_count(count.parse()?);
    }

    let result = client.query_log(request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
