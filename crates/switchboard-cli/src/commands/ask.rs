//! Ask command: run a query through the workflow

use crate::app::AskArgs;
use std::time::Duration;
use switchboard_core::{Result, Session, SwitchboardError};
use tokio_util::sync::CancellationToken;

pub async fn run(args: AskArgs, session: &Session) -> Result<()> {
    let query = args.query.join(" ");

    let result = match args.timeout_secs {
        Some(secs) => {
            let token = CancellationToken::new();
            let deadline = token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                deadline.cancel();
            });
            session.handle_query_with_cancel(&query, token).await
        }
        None => session.handle_query(&query).await,
    };

    match result {
        Ok((response, state)) => {
            println!("{}", response);
            if args.show_state {
                eprintln!();
                eprintln!("{}", serde_json::to_string_pretty(&state)?);
            }
            Ok(())
        }
        Err(SwitchboardError::Cancelled) => {
            eprintln!("Request cancelled.");
            Err(SwitchboardError::Cancelled)
        }
        Err(e) => {
            // Upstream failures surface as one generic message; the
            // cause goes to the log, not the user.
            tracing::error!(error = %e, "query failed");
            eprintln!("Sorry, something went wrong while handling your request.");
            Err(e)
        }
    }
}
