//! Fallback for utterances no intent could claim: scan the transcript for
//! known topics and suggest phrasings the bot does understand.

use hrmate_core::{tables, DialogResponse};

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::close;

pub async fn handle(event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    let message = match tables::suggestions_for(event.transcript()) {
        None => "Sorry, I am unable to help you with this. Please reach out to HR.".to_owned(),
        Some(suggestions) => {
            let mut message = "Your query looks similar to a query I have answers to.\n Please \
                               try entering the below query\n"
                .to_owned();
            for suggestion in suggestions {
                message.push_str(&format!("\"{suggestion}\"\n"));
            }
            message
        }
    };
    Ok(close(event.session_attributes(), message))
}
