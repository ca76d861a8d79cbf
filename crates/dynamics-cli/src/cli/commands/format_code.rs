use dynamics_results::{pretty_code, INVALID_CODE};

use crate::cli::args::FormatCodeArgs;
use crate::exit_codes::{INVALID_INPUT, SUCCESS};

pub fn run(args: FormatCodeArgs) -> anyhow::Result<i32> {
    let pretty = pretty_code(&args.code);
    println!("{}", pretty);
    Ok(if pretty == INVALID_CODE {
        INVALID_INPUT
    } else {
        SUCCESS
    })
}
