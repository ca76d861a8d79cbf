use dynamics_results::{
    parse_answer_string, pretty_code, OperationReport, ProxyOutcome, ResultsClient,
    SubmissionPayload,
};

use super::print_json;
use crate::cli::args::SubmitArgs;
use crate::exit_codes;

pub async fn run(args: SubmitArgs, client: ResultsClient) -> anyhow::Result<i32> {
    let payload = parse_answer_string(&args.answers)
        .and_then(|answers| SubmissionPayload::new(&answers, args.start, args.start_code.clone()));

    let payload = match payload {
        Ok(payload) => payload,
        Err(e) => {
            if args.json {
                print_json(&OperationReport::<()>::from_error(&e))?;
            } else {
                eprintln!("error: {}", e);
            }
            return Ok(exit_codes::for_error(&e));
        }
    };

    let outcome = client.submit_results(&payload).await;
    let code = exit_codes::for_outcome(&outcome);

    if args.json {
        print_json(&outcome.into_report())?;
        return Ok(code);
    }

    match outcome {
        ProxyOutcome::Success(body) => {
            let stored = body
                .as_ref()
                .and_then(|b| b.get("resultCode"))
                .and_then(|c| c.as_str().map(String::from).or_else(|| Some(c.to_string())));
            match stored {
                Some(result_code) => println!("stored result {}", pretty_code(result_code)),
                None => println!("stored result"),
            }
        }
        ProxyOutcome::InvalidFormat => eprintln!("error: answers were rejected as invalid"),
        ProxyOutcome::Failure { message } => eprintln!("error: failed to store results: {}", message),
    }
    Ok(code)
}
