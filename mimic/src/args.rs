use clap::Parser;

/// Mock LLM server
#[derive(Debug, Parser)]
#[command(name = "mimic", about = "Wire-compatible mock server for LLM vendor APIs")]
pub struct Args {
    /// The server port binds to
    #[arg(long, default_value_t = 3000, env = "MIMIC_SERVER_PORT")]
    pub server_port: u16,

    /// The provider type to use. If not specified, all routes will be enabled
    #[arg(long, env = "MIMIC_PROVIDER_TYPE")]
    pub provider_type: Option<String>,
}
