use crate::app::presenter::{self, Notification, ShipmentCard};
use crate::core::{ShipmentAssignment, ShipmentRepository};
use crate::domain::eligibility::is_compatible;
use crate::domain::model::{AssignmentReceipt, ParcelDraft, Shipment, TransportType};
use crate::domain::parcel_type::map_parcel_type;
use crate::utils::error::{ColisError, Result};
use crate::utils::validation::Validate;

/// 介面需要執行的動作
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    ShowShipments(Vec<ShipmentCard>),
    Notify(Notification),
    ResetTypeField,
    CloseSelector,
    ResetForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedShipment {
    pub id: String,
    pub numero: String,
    pub transport: TransportType,
}

/// 包裹登記畫面的狀態。事件處理函式拿 `&mut self`，介面層只負責轉送事件、執行回傳的 `UiEffect`。
pub struct RegistrationSession<R: ShipmentRepository> {
    service: ShipmentAssignment<R>,
    type_label: Option<String>,
    candidates: Vec<Shipment>,
    selected: Option<SelectedShipment>,
    draft: Option<ParcelDraft>,
    last_receipt: Option<AssignmentReceipt>,
    last_error: Option<ColisError>,
}

impl<R: ShipmentRepository> RegistrationSession<R> {
    pub fn new(service: ShipmentAssignment<R>) -> Self {
        Self {
            service,
            type_label: None,
            candidates: Vec::new(),
            selected: None,
            draft: None,
            last_receipt: None,
            last_error: None,
        }
    }

    pub fn selected(&self) -> Option<&SelectedShipment> {
        self.selected.as_ref()
    }

    pub fn candidates(&self) -> &[Shipment] {
        &self.candidates
    }

    pub fn type_label(&self) -> Option<&str> {
        self.type_label.as_deref()
    }

    pub fn draft(&self) -> Option<&ParcelDraft> {
        self.draft.as_ref()
    }

    pub fn last_receipt(&self) -> Option<&AssignmentReceipt> {
        self.last_receipt.as_ref()
    }

    /// 最近一次事件失敗的原因；取出後清空
    pub fn take_last_error(&mut self) -> Option<ColisError> {
        self.last_error.take()
    }

    /// 包裹類型改變：重新查詢可用的貨運批次
    pub async fn parcel_type_changed(&mut self, type_label: &str) -> Vec<UiEffect> {
        self.last_error = None;
        let type_label = type_label.trim();
        if type_label.is_empty() {
            return Vec::new();
        }

        self.selected = None;
        self.candidates.clear();
        self.type_label = Some(type_label.to_string());

        match self.service.available_shipments(type_label).await {
            Ok(shipments) if shipments.is_empty() => {
                self.type_label = None;
                vec![
                    UiEffect::Notify(presenter::no_shipment_available(type_label)),
                    UiEffect::ResetTypeField,
                ]
            }
            Ok(shipments) => {
                let cards = presenter::shipment_cards(&shipments);
                self.candidates = shipments;
                vec![UiEffect::ShowShipments(cards)]
            }
            Err(e) => {
                tracing::error!("Failed to load shipments: {}", e);
                self.type_label = None;
                let notification = Notification::error(format!(
                    "Erreur lors du chargement des cargaisons. {}",
                    e.user_friendly_message()
                ));
                self.last_error = Some(e);
                vec![UiEffect::Notify(notification), UiEffect::ResetTypeField]
            }
        }
    }

    /// 使用者在清單中選了一個貨運批次
    pub fn shipment_chosen(&mut self, shipment_id: &str) -> Vec<UiEffect> {
        self.last_error = None;
        let found = self
            .candidates
            .iter()
            .find(|s| s.id == shipment_id)
            .map(|shipment| SelectedShipment {
                id: shipment.id.to_string(),
                numero: shipment.numero.clone(),
                transport: shipment.transport_type.clone(),
            });
        let Some(selected) = found else {
            tracing::warn!("Shipment {} is not among the listed candidates", shipment_id);
            return vec![self.fail(ColisError::NoShipmentSelectedError)];
        };
        tracing::debug!("Shipment selected: {:?}", selected);

        let notification = presenter::shipment_selected(&selected.numero);
        self.selected = Some(selected);
        vec![UiEffect::CloseSelector, UiEffect::Notify(notification)]
    }

    pub fn selection_cancelled(&mut self) -> Vec<UiEffect> {
        self.selected = None;
        vec![UiEffect::CloseSelector]
    }

    /// 送出表單：驗證後把包裹加入已選的貨運批次
    pub async fn form_submitted(&mut self, draft: ParcelDraft) -> Vec<UiEffect> {
        self.last_error = None;
        if let Err(e) = draft.validate() {
            return vec![self.fail(e)];
        }

        let mut effects = Vec::new();
        if draft.is_heavy() {
            effects.push(UiEffect::Notify(presenter::heavy_parcel_warning()));
        }

        let Some(selected) = self.selected.clone() else {
            effects.push(self.fail(ColisError::NoShipmentSelectedError));
            return effects;
        };

        // 清單是依篩選時的類型產生的；表單上的類型必須一致且相容於已選的運輸方式
        if let Err(e) = self.check_draft_type(&draft, &selected) {
            effects.push(self.fail(e));
            return effects;
        }

        self.draft = Some(draft.clone());
        match self.service.assign_parcel(&selected.id, &draft).await {
            Ok(receipt) => {
                let tracking_code = receipt.parcel.code_de_suivi.clone().unwrap_or_default();
                effects.push(UiEffect::Notify(presenter::parcel_registered(
                    &draft,
                    &receipt.shipment_numero,
                    &tracking_code,
                )));
                effects.push(UiEffect::ResetForm);
                effects.push(UiEffect::CloseSelector);
                self.reset();
                self.last_receipt = Some(receipt);
            }
            Err(e) => effects.push(self.fail(e)),
        }
        effects
    }

    fn check_draft_type(
        &self,
        draft: &ParcelDraft,
        selected: &SelectedShipment,
    ) -> Result<()> {
        let parcel_type = map_parcel_type(&draft.type_label);

        let filtered_type = self.type_label.as_deref().map(map_parcel_type);
        if filtered_type.as_ref().is_some_and(|filtered| *filtered != parcel_type) {
            return Err(ColisError::ParcelValidationError {
                field: "type".to_string(),
                reason: "Le type de colis a changé depuis la sélection de la cargaison. \
                         Veuillez choisir à nouveau une cargaison."
                    .to_string(),
            });
        }

        if !is_compatible(&parcel_type, &selected.transport) {
            return Err(ColisError::ParcelValidationError {
                field: "type".to_string(),
                reason: format!(
                    "Les colis de type \"{}\" ne peuvent pas voyager en transport {}",
                    presenter::type_label_display(&draft.type_label),
                    selected.transport
                ),
            });
        }
        Ok(())
    }

    /// 記錄錯誤並轉成錯誤通知
    fn fail(&mut self, error: ColisError) -> UiEffect {
        tracing::error!(
            "Parcel registration step failed: {} (Category: {:?})",
            error,
            error.category()
        );
        let notification = Notification::error(error.user_friendly_message());
        self.last_error = Some(error);
        UiEffect::Notify(notification)
    }

    fn reset(&mut self) {
        self.type_label = None;
        self.candidates.clear();
        self.selected = None;
        self.draft = None;
    }
}
