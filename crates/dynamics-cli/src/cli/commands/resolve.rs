use dynamics_results::{OperationReport, ResultResolver, ResultsClient, TransformedResult};

use super::print_json;
use crate::cli::args::ResolveArgs;
use crate::exit_codes::{self, SUCCESS};

pub async fn run(args: ResolveArgs, client: ResultsClient) -> anyhow::Result<i32> {
    let resolver = ResultResolver::new(client);
    let result = resolver.resolve(&args.code).await;
    let code = result.as_ref().map_or_else(exit_codes::for_error, |_| SUCCESS);

    if args.json {
        print_json(&OperationReport::from_result(result))?;
        return Ok(code);
    }

    match result {
        Ok(resolved) => {
            println!("result {}", resolved.pretty_code());
            print_answers("current", resolved.current.as_ref());
            if resolved.start.is_some() {
                print_answers("start", resolved.start.as_ref());
            }
        }
        Err(e) => eprintln!("error: {}", e),
    }
    Ok(code)
}

fn print_answers(label: &str, result: Option<&TransformedResult>) {
    let Some(result) = result else {
        println!("{label}: none");
        return;
    };

    let answers: Vec<String> = result
        .answers
        .entries()
        .iter()
        .map(|e| format!("{}={}", e.key, e.value))
        .collect();
    println!("{label}: {}", answers.join(" "));
}
