use crate::config::toml_config::TomlConfig;
use crate::config::BackendSettings;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "colis-manager")]
#[command(about = "Register parcels into open shipments of a cargaisons REST backend")]
pub struct CliConfig {
    #[arg(long, env = "COLIS_API_URL", help = "Backend base URL [default: http://localhost:3000]")]
    pub base_url: Option<String>,

    #[arg(long, help = "Collection name [default: cargaisons]")]
    pub collection: Option<String>,

    #[arg(long, help = "Request timeout in seconds [default: 30]")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the shipments that can take a parcel of the given type
    Available {
        #[arg(long = "type", help = "alimentaire, chimique, materiel-fragile or materiel-incassable")]
        type_label: String,
    },
    /// Add one parcel to a shipment
    Assign {
        #[arg(long)]
        cargaison: String,
        #[arg(long = "type")]
        type_label: String,
        #[arg(long)]
        poids: f64,
        #[arg(long)]
        libelle: String,
    },
    /// Walk through the registration flow: list shipments, pick one, register the parcel
    Register {
        #[arg(long = "type")]
        type_label: String,
        #[arg(long)]
        poids: f64,
        #[arg(long)]
        libelle: String,
        #[arg(long, help = "Shipment id; prompts for a choice when omitted")]
        cargaison: Option<String>,
    },
}

impl CliConfig {
    pub fn load_toml(&self) -> Result<Option<TomlConfig>> {
        self.config.as_ref().map(TomlConfig::from_file).transpose()
    }

    /// 合併 TOML 與命令列參數
    pub fn backend_settings(&self, toml: Option<&TomlConfig>) -> BackendSettings {
        toml.map(TomlConfig::backend_settings)
            .unwrap_or_default()
            .with_overrides(
                self.base_url.clone(),
                self.collection.clone(),
                self.timeout_seconds,
            )
    }
}
