use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dynamics",
    version,
    about = "Look up, submit and share dynamics quiz results"
)]
pub struct Cli {
    /// Results backend base URL (overrides DYNAMICS_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Email endpoint (overrides DYNAMICS_EMAIL_URL)
    #[arg(long, global = true)]
    pub email_url: Option<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse an answer string such as a1b2c3d4e5f1g2h3
    Parse(ParseArgs),
    /// Print a 6-character result code as "XXX XXX"
    FormatCode(FormatCodeArgs),
    /// Fetch the results stored under a code
    Resolve(ResolveArgs),
    /// Email a result link
    Email(EmailArgs),
    /// Store answers with the backend
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    pub answers: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FormatCodeArgs {
    pub code: String,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    pub code: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EmailArgs {
    /// Recipient address
    #[arg(long)]
    pub to: String,

    /// Answer string the link points at
    pub answers: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    pub answers: String,

    /// Mark this as a starting-point (baseline) quiz
    #[arg(long, conflicts_with = "start_code")]
    pub start: bool,

    /// Code of the baseline this quiz follows up on
    #[arg(long)]
    pub start_code: Option<String>,

    #[arg(long)]
    pub json: bool,
}
