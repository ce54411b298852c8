use clap::{Parser, ValueEnum};
use log::info;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Attribution record as pretty JSON
    Data,
    /// Plain-text CRM note
    Note,
    /// Form-urlencoded body for a lead capture POST
    Form,
    /// Print nothing
    None,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[arg(
        long = "url",
        value_delimiter = ',',
        help = "Comma-separated page views, in visit order (absolute URLs or /paths)"
    )]
    pub urls: Vec<String>,

    #[arg(
        long,
        help = "Referrer of the first page view; later views use the previous --url as referrer"
    )]
    pub referrer: Option<String>,

    #[arg(
        long,
        env = "UTM_ATTRIBUTION_SESSION",
        default_value = "default",
        help = "Browsing session identifier"
    )]
    pub session: String,

    #[arg(long, help = "Path to a settings JSON file")]
    pub settings: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Note, help = "What to print")]
    pub output: OutputFormat,

    #[arg(long = "end-session", help = "Clear the stored attribution after printing")]
    pub end_session: bool,
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let args = CommandLineArgs::parse();

        info!("Parsed {} page view(s) from --url", args.urls.len());
        info!("Using session '{}'", args.session);

        args
    }
}
