mod common;

use messagenet::{MessageId, ReserveDelete};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let client = common::client_from_env()?;

    // MESSAGENET_MESSAGE_IDS=all cancels every reservation; an empty list is an error.
    let ids = common::list_env("MESSAGENET_MESSAGE_IDS");
    let request = if ids.len() == 1 && ids[0] == "all" {
        ReserveDelete::all()
    } else {
        ReserveDelete::ids(
            ids.into_iter()
                .map(MessageId::new)
                .collect::<Result<Vec<_>, _>>()?,
        )?
    };

    let result = client.reserve_delete(request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
