use dynamics_results::{ProxyOutcome, ResultsClient};

use super::print_json;
use crate::cli::args::EmailArgs;
use crate::exit_codes;

pub async fn run(args: EmailArgs, client: ResultsClient) -> anyhow::Result<i32> {
    let outcome = client.send_email(&args.to, &args.answers).await;
    let code = exit_codes::for_outcome(&outcome);

    if args.json {
        print_json(&outcome.into_report())?;
        return Ok(code);
    }

    match outcome {
        ProxyOutcome::Success(_) => println!("sent results to {}", args.to),
        ProxyOutcome::InvalidFormat => eprintln!("error: email or answers were rejected as invalid"),
        ProxyOutcome::Failure { message } => eprintln!("error: failed to send email: {}", message),
    }
    Ok(code)
}
