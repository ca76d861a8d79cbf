use dynamics_results::{parse_answer_string, OperationReport};

use super::print_json;
use crate::cli::args::ParseArgs;
use crate::exit_codes::{self, SUCCESS};

pub fn run(args: ParseArgs) -> anyhow::Result<i32> {
    let result = parse_answer_string(&args.answers);

    if args.json {
        let code = result.as_ref().map_or_else(exit_codes::for_error, |_| SUCCESS);
        print_json(&OperationReport::from_result(result))?;
        return Ok(code);
    }

    match result {
        Ok(set) => {
            for entry in set.entries() {
                println!("{} {}", entry.key, entry.value);
            }
            let duplicates = set.duplicate_keys();
            if !duplicates.is_empty() {
                let keys: Vec<String> = duplicates.iter().map(ToString::to_string).collect();
                eprintln!("warning: repeated keys {}; later values win", keys.join(", "));
            }
            Ok(SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            Ok(exit_codes::for_error(&e))
        }
    }
}
