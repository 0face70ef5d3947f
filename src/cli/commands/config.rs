use clap::Subcommand;

use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Print the effective configuration with secrets redacted")]
    Show,
}

pub fn handle(cmd: ConfigCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let redacted = config::config().redacted();
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&redacted)?),
                OutputFormat::Text => println!("{:#?}", redacted),
            }
            Ok(())
        }
    }
}
