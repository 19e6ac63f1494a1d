//! Ingest command: add a document to the index

use crate::app::IngestArgs;
use switchboard_core::{Result, Session};

pub async fn run(args: IngestArgs, session: &Session) -> Result<()> {
    match session.upload_document(&args.path).await {
        Ok(message) => {
            println!("{}", message);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error processing document: {}", e);
            Err(e)
        }
    }
}
