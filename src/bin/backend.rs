//! Standalone demo: a tiny HTTP listener that pokes the local model once at
//! startup and once per incoming request, logging whatever it says. Every
//! request gets the same fixed body no matter what the model does.

use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use susan::{api::OllamaClient, config::Config};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

const LISTEN_ADDR: &str = "127.0.0.1:3000";
const BODY: &str = "Hello World!\n";
const DEMO_PROMPT: &str = "Hello, how are you?";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let client = Arc::new(OllamaClient::new(config));

    let listener = TcpListener::bind(LISTEN_ADDR).await?;
    info!("Listening on {}", LISTEN_ADDR);

    invoke_model(&client).await;

    loop {
        let (mut socket, peer) = listener.accept().await?;
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            // Drain whatever arrived of the request; the reply is fixed anyway.
            let _ = socket.read(&mut buf).await;

            invoke_model(&client).await;

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                BODY.len(),
                BODY
            );
            if let Err(e) = socket.write_all(response.as_bytes()).await {
                error!("failed to answer {}: {}", peer, e);
            }
        });
    }
}

async fn invoke_model(client: &OllamaClient) {
    match client.generate_response(DEMO_PROMPT).await {
        Ok(reply) => info!("model says: {}", reply),
        Err(e) => error!("model call failed: {}", e),
    }
}
