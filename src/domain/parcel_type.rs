use crate::domain::model::ParcelType;

/// 將表單上的類型標籤轉成包裹類型。
///
/// 無法辨識的標籤一律當作 `ALIMENTAIRE`，只記一筆警告，不回傳錯誤。
pub fn map_parcel_type(label: &str) -> ParcelType {
    let normalized = label.trim().to_lowercase().replace('_', "-");

    match normalized.as_str() {
        "alimentaire" => ParcelType::Food,
        "chimique" => ParcelType::Chemical,
        "materiel-fragile" => ParcelType::FragileGoods,
        "materiel-incassable" => ParcelType::UnbreakableGoods,
        _ => {
            tracing::warn!(
                "Unknown parcel type '{}', falling back to {}",
                label,
                ParcelType::Food
            );
            ParcelType::Food
        }
    }
}

/// 介面上顯示的名稱
pub fn display_name(parcel_type: &ParcelType) -> &str {
    match parcel_type {
        ParcelType::Food => "Alimentaire",
        ParcelType::Chemical => "Chimique",
        ParcelType::FragileGoods => "Matériel Fragile",
        ParcelType::UnbreakableGoods => "Matériel Incassable",
        ParcelType::Other(raw) => raw.as_str(),
    }
}
