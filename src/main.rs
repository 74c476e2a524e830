use anyhow::Context;
use clap::Parser;
use colis_manager::app::presenter::{self, NotificationLevel};
use colis_manager::config::cli::Command;
use colis_manager::config::toml_config::TomlConfig;
use colis_manager::utils::{logger, validation::Validate};
use colis_manager::{
    CliConfig, ColisError, HttpShipmentRepository, ParcelDraft, RegistrationSession,
    ShipmentAssignment, UiEffect,
};
use std::io::{BufRead, Write};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let toml = match config.load_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let verbose = config.verbose || toml.as_ref().is_some_and(TomlConfig::verbose);
    if config.json_logs || toml.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    let settings = config.backend_settings(toml.as_ref());
    tracing::debug!("Backend settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let outcome = match HttpShipmentRepository::new(&settings) {
        Ok(repository) => run(config.command, ShipmentAssignment::new(repository)).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = outcome {
        std::process::exit(report_failure(&e));
    }
}

async fn run(
    command: Command,
    service: ShipmentAssignment<HttpShipmentRepository>,
) -> anyhow::Result<()> {
    match command {
        Command::Available { type_label } => {
            let shipments = service.available_shipments(&type_label).await?;
            if shipments.is_empty() {
                println!("{}", presenter::no_shipment_available(&type_label));
                return Ok(());
            }
            for (index, card) in presenter::shipment_cards(&shipments).iter().enumerate() {
                println!("{:>3}. {}", index + 1, card);
            }
            Ok(())
        }
        Command::Assign {
            cargaison,
            type_label,
            poids,
            libelle,
        } => {
            let draft = ParcelDraft::new(type_label, poids, libelle);
            if draft.is_heavy() {
                println!("{}", presenter::heavy_parcel_warning());
            }
            let receipt = service.assign_parcel(&cargaison, &draft).await?;
            let tracking_code = receipt.parcel.code_de_suivi.clone().unwrap_or_default();
            println!(
                "{}",
                presenter::parcel_registered(&draft, &receipt.shipment_numero, &tracking_code)
            );
            Ok(())
        }
        Command::Register {
            type_label,
            poids,
            libelle,
            cargaison,
        } => register(service, type_label, poids, libelle, cargaison).await,
    }
}

/// 以命令列重現登記畫面的流程
async fn register(
    service: ShipmentAssignment<HttpShipmentRepository>,
    type_label: String,
    poids: f64,
    libelle: String,
    cargaison: Option<String>,
) -> anyhow::Result<()> {
    let mut session = RegistrationSession::new(service);

    render(&session.parcel_type_changed(&type_label).await);
    if let Some(e) = session.take_last_error() {
        return Err(e.into());
    }
    if session.candidates().is_empty() {
        anyhow::bail!("no shipment available for parcel type '{}'", type_label);
    }

    let shipment_id = match cargaison {
        Some(id) => id,
        None => prompt_choice(session.candidates().len())
            .map(|index| session.candidates()[index].id.to_string())?,
    };

    render(&session.shipment_chosen(&shipment_id));
    if let Some(e) = session.take_last_error() {
        return Err(e.into());
    }

    let effects = session
        .form_submitted(ParcelDraft::new(type_label, poids, libelle))
        .await;
    render(&effects);
    if let Some(e) = session.take_last_error() {
        return Err(e.into());
    }

    match session.last_receipt() {
        Some(receipt) => {
            tracing::info!(
                "✅ Registered parcel in shipment {} ({} parcels)",
                receipt.shipment_numero,
                receipt.parcel_count
            );
            Ok(())
        }
        None => anyhow::bail!("parcel registration failed"),
    }
}

/// 把介面動作印到終端機
fn render(effects: &[UiEffect]) {
    for effect in effects {
        match effect {
            UiEffect::ShowShipments(cards) => {
                println!("Cargaisons disponibles :");
                for (index, card) in cards.iter().enumerate() {
                    println!("{:>3}. {}", index + 1, card);
                }
            }
            UiEffect::Notify(notification) => {
                if notification.level == NotificationLevel::Error {
                    eprintln!("{}", notification);
                } else {
                    println!("{}", notification);
                }
            }
            other => tracing::debug!("UI effect: {:?}", other),
        }
    }
}

fn prompt_choice(count: usize) -> anyhow::Result<usize> {
    print!("Numéro de la cargaison (1-{}) : ", count);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read shipment choice")?;

    let choice: usize = line
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a number", line.trim()))?;
    if choice == 0 || choice > count {
        anyhow::bail!("choice must be between 1 and {}", count);
    }
    Ok(choice - 1)
}

/// 記錄錯誤並依嚴重程度決定退出碼
fn report_failure(error: &anyhow::Error) -> i32 {
    let Some(e) = error.downcast_ref::<ColisError>() else {
        tracing::error!("❌ {:#}", error);
        eprintln!("❌ {:#}", error);
        return 1;
    };

    tracing::error!(
        "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    e.exit_code()
}
