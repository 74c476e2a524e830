use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColisError {
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Backend returned status {status} for {method} {url}")]
    HttpStatusError {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Shipment not found: {id}")]
    ShipmentNotFoundError { id: String },

    #[error("Shipment {numero} is full (maximum {max} parcels)")]
    ShipmentFullError { numero: String, max: usize },

    #[error("Shipment {numero} is not open (state: {state})")]
    ShipmentClosedError { numero: String, state: String },

    #[error("Invalid parcel field '{field}': {reason}")]
    ParcelValidationError { field: String, reason: String },

    #[error("No shipment selected")]
    NoShipmentSelectedError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，對應使用者介面上的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    NotFound,
    Capacity,
    ClosedState,
    Validation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ColisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ColisError::TransportError(_) | ColisError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            ColisError::ShipmentNotFoundError { .. } => ErrorCategory::NotFound,
            ColisError::ShipmentFullError { .. } => ErrorCategory::Capacity,
            ColisError::ShipmentClosedError { .. } => ErrorCategory::ClosedState,
            ColisError::ParcelValidationError { .. } | ColisError::NoShipmentSelectedError => {
                ErrorCategory::Validation
            }
            ColisError::ConfigError { .. } | ColisError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ColisError::IoError(_) | ColisError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::NotFound
            | ErrorCategory::Capacity
            | ErrorCategory::ClosedState
            | ErrorCategory::Validation
            | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 命令列退出碼：網路錯誤 2（可稍後再試），輸入或資料錯誤 1，系統錯誤 3
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 給終端使用者看的訊息（介面語言為法文）
    pub fn user_friendly_message(&self) -> String {
        match self {
            ColisError::TransportError(_) => {
                "Erreur de connexion au serveur des cargaisons".to_string()
            }
            ColisError::HttpStatusError { status, .. } => {
                format!("Erreur serveur: {}", status)
            }
            ColisError::ShipmentNotFoundError { id } => format!("Cargaison non trouvée: {}", id),
            ColisError::ShipmentFullError { max, .. } => {
                format!("La cargaison est pleine (maximum {} colis)", max)
            }
            ColisError::ShipmentClosedError { .. } => "La cargaison est fermée".to_string(),
            ColisError::ParcelValidationError { reason, .. } => reason.clone(),
            ColisError::NoShipmentSelectedError => {
                "Veuillez d'abord sélectionner une cargaison en choisissant un type de colis."
                    .to_string()
            }
            ColisError::IoError(e) => format!("Erreur d'entrée/sortie: {}", e),
            ColisError::SerializationError(_) => {
                "Réponse du serveur illisible".to_string()
            }
            ColisError::ConfigError { message } => format!("Configuration invalide: {}", message),
            ColisError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration invalide ({}): {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the backend is running (e.g. `npm run json`) and reachable"
            }
            ErrorCategory::NotFound => "List available shipments again and pick an existing one",
            ErrorCategory::Capacity => "Choose another shipment with free capacity",
            ErrorCategory::ClosedState => "Choose an open shipment",
            ErrorCategory::Validation => "Correct the parcel data and submit again",
            ErrorCategory::Configuration => "Check the command-line flags and the TOML file",
            ErrorCategory::System => "Inspect the logs with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, ColisError>;
