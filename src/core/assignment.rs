use crate::domain::eligibility::eligible_shipments;
use crate::domain::model::{AssignmentReceipt, Parcel, ParcelDraft, Shipment, MAX_PARCELS_PER_SHIPMENT};
use crate::domain::parcel_type::map_parcel_type;
use crate::domain::ports::ShipmentRepository;
use crate::domain::tracking::generate_tracking_code;
use crate::utils::error::{ColisError, Result};
use crate::utils::validation::Validate;
use chrono::Utc;

/// 包裹分派服務：查詢可用的貨運批次，以及把包裹加進指定批次。
pub struct ShipmentAssignment<R: ShipmentRepository> {
    repository: R,
}

impl<R: ShipmentRepository> ShipmentAssignment<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// 取回全部貨運批次，篩出可接收此類型包裹的批次
    pub async fn available_shipments(&self, type_label: &str) -> Result<Vec<Shipment>> {
        let parcel_type = map_parcel_type(type_label);
        tracing::debug!("Looking up shipments for parcel type {}", parcel_type);

        let shipments = self.repository.list().await?;
        let total = shipments.len();
        let eligible = eligible_shipments(&parcel_type, shipments);

        tracing::info!(
            "{} of {} shipments can take {} parcels",
            eligible.len(),
            total,
            parcel_type
        );
        Ok(eligible)
    }

    /// 把包裹加入貨運批次並整筆寫回後端。
    ///
    /// 先前篩選時看到的狀態可能已過期，所以這裡一定重新讀取並再檢查一次容量與開放狀態。
    /// 失敗不重試。
    pub async fn assign_parcel(
        &self,
        shipment_id: &str,
        draft: &ParcelDraft,
    ) -> Result<AssignmentReceipt> {
        draft.validate()?;

        let mut shipment = self.repository.get(shipment_id).await?;
        tracing::debug!(
            "Fetched shipment {} ({} parcels, state {})",
            shipment.numero,
            shipment.colis.len(),
            shipment.etat_global
        );

        if shipment.is_full() {
            return Err(ColisError::ShipmentFullError {
                numero: shipment.numero,
                max: MAX_PARCELS_PER_SHIPMENT,
            });
        }

        if !shipment.is_open() {
            return Err(ColisError::ShipmentClosedError {
                numero: shipment.numero,
                state: shipment.etat_global.to_string(),
            });
        }

        let parcel = Parcel::new(
            generate_tracking_code(),
            draft.libelle.trim().to_string(),
            draft.poids,
            map_parcel_type(&draft.type_label),
            Utc::now(),
        );
        tracing::debug!("Created parcel {:?}", parcel.code_de_suivi);

        shipment.colis.push(parcel.clone());
        self.repository.replace(&shipment).await?;

        tracing::info!(
            "Parcel {} added to shipment {} ({}/{})",
            parcel.code_de_suivi.as_deref().unwrap_or_default(),
            shipment.numero,
            shipment.colis.len(),
            MAX_PARCELS_PER_SHIPMENT
        );

        Ok(AssignmentReceipt {
            shipment_id: shipment.id.to_string(),
            shipment_numero: shipment.numero,
            parcel_count: shipment.colis.len(),
            parcel,
        })
    }
}
