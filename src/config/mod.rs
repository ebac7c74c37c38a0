pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::ServerConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "health-server")]
#[command(about = "Health tracking HTTP backend: symptom advice, food log and BMR")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "health.toml")]
    pub config: String,

    /// Override server.port from the config file
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Validate configuration and catalog, then exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋；檔案不存在時使用預設值
    pub fn load_server_config(&self) -> Result<ServerConfig> {
        // 此時日誌尚未初始化，不在這裡輸出訊息
        let mut config = if self.config_file_exists() {
            ServerConfig::from_file(&self.config)?
        } else {
            ServerConfig::from_env()
        };

        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.verbose {
            config.logging.verbose = true;
        }
        if self.json_logs {
            config.logging.json = true;
        }

        Ok(config)
    }

    pub fn config_file_exists(&self) -> bool {
        std::path::Path::new(&self.config).exists()
    }
}
