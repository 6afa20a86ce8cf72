mod common;

use messagenet::{GatewayDate, MessageText, Recipient, SendOptions, SendSms};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let client = common::client_from_env()?;

    let recipients = common::list_env("MESSAGENET_TEL")
        .into_iter()
        .map(Recipient::new)
        .collect::<Result<Vec<_>, _>>()?;
    if recipients.is_empty() {
        common::required_env("MESSAGENET_TEL")?;
    }
    let message = std::env::var("MESSAGENET_MESSAGE")
        .unwrap_or_else(|_| "Hello from the messagenet demo.".to_owned());
    let options = SendOptions {
        long_sms: std::env::var("MESSAGENET_LONG_SMS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0),
        send_date: std::env::var("MESSAGENET_SEND_DATE")
            .ok()
            .map(GatewayDate::new)
            .transpose()?,
    };

    let request = SendSms::new(recipients, MessageText::new(message)?, options);
    let result = client.send(request).await;

    for chunk in &result.chunks {
        match &chunk.result {
            Ok(outcome) => println!(
                "recipients {:?}: {}",
                chunk.recipients,
                serde_json::to_string(outcome)?
            ),
            Err(err) => eprintln!("recipients {:?}: {err}", chunk.recipients),
        }
    }

    Ok(())
}
