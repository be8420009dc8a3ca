use std::io::Write;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::chat::Chat;
use crate::core::AppConfig;

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let config = AppConfig::default();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let mut chat = Chat::builder(
        &config.openai_api_hostname,
        &config.openai_api_key,
        &config.openai_model,
    )
    .streaming(tx)
    .build();

    let mut stdout = std::io::stdout();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                // Render fragments while the request is in flight
                let send = chat.send(&line);
                tokio::pin!(send);
                let result = loop {
                    tokio::select! {
                        result = &mut send => break result,
                        Some(fragment) = rx.recv() => {
                            print!("{}", fragment);
                            let _ = stdout.flush();
                        }
                    }
                };

                // Everything still queued was sent before the turn
                // finished
                while let Ok(fragment) = rx.try_recv() {
                    print!("{}", fragment);
                }
                let _ = stdout.flush();

                match result {
                    Ok(Some(_)) => println!(),
                    // Blank input: prompt again without a request
                    Ok(None) => {}
                    Err(e) => println!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
