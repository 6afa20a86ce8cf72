use std::io;

use messagenet::{Credential, MessageNetClient};
use tracing_subscriber::EnvFilter;

/// Log to stderr, honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

pub fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

/// Build a client from `MESSAGENET_ID`, `MESSAGENET_PASSWORD` and the optional
/// `MESSAGENET_BASE_URL`.
pub fn client_from_env() -> Result<MessageNetClient, Box<dyn std::error::Error>> {
    let credential = Credential::new(
        required_env("MESSAGENET_ID")?,
        required_env("MESSAGENET_PASSWORD")?,
    )?;

    let mut builder = MessageNetClient::builder(credential);
    if let Ok(base_url) = std::env::var("MESSAGENET_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    Ok(builder.build()?)
}

/// Split a `;`- or `,`-separated env value, dropping empty items.
pub fn list_env(name: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_default()
        .split([';', ','])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
