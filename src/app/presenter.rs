use crate::domain::model::{ParcelDraft, Shipment, MAX_PARCELS_PER_SHIPMENT};
use crate::domain::parcel_type::{display_name, map_parcel_type};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// 交給介面顯示的提示訊息（toast）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, "Erreur", message)
    }

    fn new(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.level {
            NotificationLevel::Success => "✅",
            NotificationLevel::Warning => "⚠️",
            NotificationLevel::Error => "❌",
        };
        write!(f, "{} {}: {}", icon, self.title, self.message)
    }
}

/// 貨運批次清單中的一張卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentCard {
    pub id: String,
    pub numero: String,
    pub transport: String,
    pub route: String,
    pub fill: String,
    pub capacity: String,
}

impl From<&Shipment> for ShipmentCard {
    fn from(shipment: &Shipment) -> Self {
        Self {
            id: shipment.id.to_string(),
            numero: shipment.numero.clone(),
            transport: shipment.transport_type.to_string(),
            route: format!(
                "{} → {}",
                shipment.lieu_depart.pays, shipment.lieu_arrivee.pays
            ),
            fill: format!("{}/{} colis", shipment.colis.len(), MAX_PARCELS_PER_SHIPMENT),
            capacity: format!("{}kg max", shipment.poids_max),
        }
    }
}

impl fmt::Display for ShipmentCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:<10} {:<28} {:<10} {}",
            self.numero, self.transport, self.route, self.fill, self.capacity
        )
    }
}

pub fn shipment_cards(shipments: &[Shipment]) -> Vec<ShipmentCard> {
    shipments.iter().map(ShipmentCard::from).collect()
}

/// 表單類型標籤的顯示名稱，例如 `materiel-fragile` → `Matériel Fragile`
pub fn type_label_display(type_label: &str) -> String {
    display_name(&map_parcel_type(type_label)).to_string()
}

pub fn no_shipment_available(type_label: &str) -> Notification {
    Notification::error(format!(
        "Aucune cargaison disponible pour les colis de type \"{}\"",
        type_label_display(type_label)
    ))
}

pub fn shipment_selected(numero: &str) -> Notification {
    Notification::success(
        "Cargaison sélectionnée",
        format!(
            "Cargaison {} sélectionnée. Complétez maintenant les informations du colis.",
            numero
        ),
    )
}

pub fn heavy_parcel_warning() -> Notification {
    Notification::warning(
        "Poids important",
        "Le poids saisi est très élevé. Veuillez vérifier.",
    )
}

pub fn parcel_registered(draft: &ParcelDraft, numero: &str, tracking_code: &str) -> Notification {
    Notification::success(
        "Colis enregistré avec succès !",
        format!(
            "Le colis \"{}\" ({}kg) a été ajouté à la cargaison {} (code de suivi {})",
            draft.libelle.trim(),
            draft.poids,
            numero,
            tracking_code
        ),
    )
}
