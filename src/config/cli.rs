use super::GeneratorConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "huge-json")]
#[command(about = "Streams ten million random transactions into one JSON file")]
pub struct CliConfig {
    /// Destination file, replaced if it already exists
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process memory and CPU usage with every progress line")]
    pub monitor: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    pub json_logs: bool,
}

impl From<&CliConfig> for GeneratorConfig {
    fn from(cli: &CliConfig) -> Self {
        GeneratorConfig::new(cli.output_path.clone())
    }
}
