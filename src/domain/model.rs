use crate::utils::error::{ColisError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 一個貨運批次最多可容納的包裹數
pub const MAX_PARCELS_PER_SHIPMENT: usize = 10;
pub const MIN_LABEL_LENGTH: usize = 2;
/// 超過此重量只提醒，不擋
pub const HEAVY_PARCEL_KG: f64 = 1000.0;

/// 後端的列舉值是字串；未知的值原樣保留，整筆 PUT 回去時才不會遺失資料。
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(value) => value.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(value) => value,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// etatGlobal
    pub enum GlobalState {
        Open => "OUVERT",
        Closed => "FERME",
    }
}

wire_enum! {
    pub enum TransportType {
        Maritime => "MARITIME",
        Aerial => "AERIENNE",
        Road => "ROUTIERE",
    }
}

wire_enum! {
    pub enum ParcelType {
        Food => "ALIMENTAIRE",
        Chemical => "CHIMIQUE",
        FragileGoods => "MATERIEL_FRAGILE",
        UnbreakableGoods => "MATERIEL_INCASSABLE",
    }
}

wire_enum! {
    /// etatAvancement
    pub enum ProgressState {
        Pending => "EN_ATTENTE",
        InProgress => "EN_COURS",
        Arrived => "ARRIVE",
        Lost => "PERDU",
    }
}

wire_enum! {
    /// etatColis
    pub enum LifecycleState {
        Archived => "ARCHIVE",
        Collected => "RECUPERE",
        Cancelled => "ANNULE",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub pays: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Location {
    pub fn new(pays: impl Into<String>) -> Self {
        Self {
            pays: pays.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// 後端紀錄的 id。json-server 可能給數字或字串，寫回時保留原本的 JSON 型別。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
    text: String,
    numeric: bool,
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

impl From<String> for RecordId {
    fn from(text: String) -> Self {
        Self {
            text,
            numeric: false,
        }
    }
}

impl From<&str> for RecordId {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(number) = self.text.parse::<serde_json::Number>() {
                return number.serialize(serializer);
            }
        }
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(text) => Self {
                text,
                numeric: false,
            },
            StringOrNumber::Number(number) => Self {
                text: number.to_string(),
                numeric: true,
            },
        })
    }
}

/// dateCreation。既有包裹的值原樣保留（格式不一定是 RFC 3339），新包裹才用時間戳。
#[derive(Debug, Clone, PartialEq)]
pub enum CreationDate {
    Timestamp(DateTime<Utc>),
    Raw(serde_json::Value),
}

impl CreationDate {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            CreationDate::Timestamp(ts) => Some(*ts),
            CreationDate::Raw(value) => value
                .as_str()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|ts| ts.with_timezone(&Utc)),
        }
    }
}

impl Serialize for CreationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            // 與瀏覽器端 Date.toISOString() 相同格式
            CreationDate::Timestamp(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            CreationDate::Raw(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CreationDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(CreationDate::Raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub libelle: String,
    pub poids: f64,
    #[serde(rename = "type")]
    pub parcel_type: ParcelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_de_suivi: Option<String>,
    pub etat_avancement: ProgressState,
    pub etat_colis: LifecycleState,
    // 欄位存在但為 null 時也要寫回 null
    #[serde(
        default,
        deserialize_with = "present_creation_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_creation: Option<CreationDate>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Parcel {
    /// 新包裹：id 即追蹤碼，狀態固定為 EN_ATTENTE / ARCHIVE
    pub fn new(
        tracking_code: String,
        libelle: String,
        poids: f64,
        parcel_type: ParcelType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(RecordId::from(tracking_code.as_str())),
            libelle,
            poids,
            parcel_type,
            code_de_suivi: Some(tracking_code),
            etat_avancement: ProgressState::Pending,
            etat_colis: LifecycleState::Archived,
            date_creation: Some(CreationDate::Timestamp(created_at)),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: RecordId,
    #[serde(default)]
    pub numero: String,
    pub etat_global: GlobalState,
    #[serde(rename = "type")]
    pub transport_type: TransportType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub colis: Vec<Parcel>,
    #[serde(default)]
    pub poids_max: f64,
    pub lieu_depart: Location,
    pub lieu_arrivee: Location,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Shipment {
    pub fn is_open(&self) -> bool {
        self.etat_global == GlobalState::Open
    }

    pub fn is_full(&self) -> bool {
        self.colis.len() >= MAX_PARCELS_PER_SHIPMENT
    }
}

/// 使用者在表單上輸入的包裹資料，尚未驗證
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParcelDraft {
    pub type_label: String,
    pub poids: f64,
    pub libelle: String,
}

impl ParcelDraft {
    pub fn new(type_label: impl Into<String>, poids: f64, libelle: impl Into<String>) -> Self {
        Self {
            type_label: type_label.into(),
            poids,
            libelle: libelle.into(),
        }
    }

    pub fn is_heavy(&self) -> bool {
        self.poids > HEAVY_PARCEL_KG
    }
}

impl Validate for ParcelDraft {
    fn validate(&self) -> Result<()> {
        if self.type_label.trim().is_empty() {
            return Err(ColisError::ParcelValidationError {
                field: "type".to_string(),
                reason: "Veuillez sélectionner un type de colis".to_string(),
            });
        }

        if self.libelle.trim().chars().count() < MIN_LABEL_LENGTH {
            return Err(ColisError::ParcelValidationError {
                field: "libelle".to_string(),
                reason: format!(
                    "Veuillez saisir un libellé valide (minimum {} caractères)",
                    MIN_LABEL_LENGTH
                ),
            });
        }

        if !self.poids.is_finite() || self.poids <= 0.0 {
            return Err(ColisError::ParcelValidationError {
                field: "poids".to_string(),
                reason: "Veuillez saisir un poids valide (supérieur à 0)".to_string(),
            });
        }

        Ok(())
    }
}

/// 成功加入包裹後回傳給呼叫端的結果
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentReceipt {
    pub shipment_id: String,
    pub shipment_numero: String,
    pub parcel: Parcel,
    pub parcel_count: usize,
}

// json-server 會產生數字或字串 id
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn present_creation_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<CreationDate>, D::Error>
where
    D: Deserializer<'de>,
{
    CreationDate::deserialize(deserializer).map(Some)
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Parcel>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Parcel>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
