use crate::domain::model::{ParcelType, Shipment, TransportType};

/// 包裹類型與運輸方式的相容規則：
/// 易碎品不走海運，化學品只走海運，其餘皆可。
pub fn is_compatible(parcel_type: &ParcelType, transport: &TransportType) -> bool {
    match parcel_type {
        ParcelType::FragileGoods => *transport != TransportType::Maritime,
        ParcelType::Chemical => *transport == TransportType::Maritime,
        _ => true,
    }
}

/// 判斷單一貨運批次目前能否接收此類型的包裹，不能時回傳原因
pub fn rejection_reason(parcel_type: &ParcelType, shipment: &Shipment) -> Option<&'static str> {
    if !shipment.is_open() {
        return Some("closed");
    }
    if shipment.is_full() {
        return Some("full");
    }
    if !is_compatible(parcel_type, &shipment.transport_type) {
        return Some("incompatible");
    }
    None
}

/// 篩出可接收此類型包裹的貨運批次，保留原本順序。沒有符合的就回傳空集合。
pub fn eligible_shipments(parcel_type: &ParcelType, shipments: Vec<Shipment>) -> Vec<Shipment> {
    shipments
        .into_iter()
        .filter(|shipment| match rejection_reason(parcel_type, shipment) {
            Some(reason) => {
                tracing::debug!(
                    "Shipment {} rejected for {}: {}",
                    shipment.numero,
                    parcel_type,
                    reason
                );
                false
            }
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GlobalState, Location, Parcel, MAX_PARCELS_PER_SHIPMENT};
    use chrono::Utc;

    fn shipment(id: &str, state: GlobalState, transport: TransportType, parcels: usize) -> Shipment {
        let colis = (0..parcels)
            .map(|i| {
                Parcel::new(
                    format!("COL-00000{}-AAAAAA", i),
                    format!("Colis {}", i),
                    1.0,
                    ParcelType::Food,
                    Utc::now(),
                )
            })
            .collect();

        Shipment {
            id: id.into(),
            numero: format!("CRG-{}", id),
            etat_global: state,
            transport_type: transport,
            colis,
            poids_max: 1000.0,
            lieu_depart: Location::new("Sénégal"),
            lieu_arrivee: Location::new("France"),
            extra: serde_json::Map::new(),
        }
    }

    fn ids(shipments: &[Shipment]) -> Vec<&str> {
        shipments.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_compatibility_matrix() {
        use ParcelType::*;
        use TransportType::*;

        assert!(!is_compatible(&FragileGoods, &Maritime));
        assert!(is_compatible(&FragileGoods, &Aerial));
        assert!(is_compatible(&FragileGoods, &Road));

        assert!(is_compatible(&Chemical, &Maritime));
        assert!(!is_compatible(&Chemical, &Aerial));
        assert!(!is_compatible(&Chemical, &Road));
        assert!(!is_compatible(&Chemical, &TransportType::Other("FERROVIAIRE".to_string())));

        for transport in [Maritime, Aerial, Road] {
            assert!(is_compatible(&Food, &transport));
            assert!(is_compatible(&UnbreakableGoods, &transport));
        }
    }

    #[test]
    fn test_closed_shipments_are_excluded() {
        let shipments = vec![
            shipment("1", GlobalState::Closed, TransportType::Road, 0),
            shipment("2", GlobalState::Other("EN_TRANSIT".to_string()), TransportType::Road, 0),
            shipment("3", GlobalState::Open, TransportType::Road, 0),
        ];

        let result = eligible_shipments(&ParcelType::Food, shipments);
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_full_shipments_are_excluded() {
        let shipments = vec![
            shipment("1", GlobalState::Open, TransportType::Aerial, MAX_PARCELS_PER_SHIPMENT),
            shipment("2", GlobalState::Open, TransportType::Aerial, MAX_PARCELS_PER_SHIPMENT - 1),
        ];

        let result = eligible_shipments(&ParcelType::UnbreakableGoods, shipments);
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_type_rules_applied_and_order_kept() {
        let shipments = vec![
            shipment("m", GlobalState::Open, TransportType::Maritime, 2),
            shipment("a", GlobalState::Open, TransportType::Aerial, 2),
            shipment("r", GlobalState::Open, TransportType::Road, 2),
        ];

        assert_eq!(
            ids(&eligible_shipments(&ParcelType::Chemical, shipments.clone())),
            vec!["m"]
        );
        assert_eq!(
            ids(&eligible_shipments(&ParcelType::FragileGoods, shipments.clone())),
            vec!["a", "r"]
        );
        assert_eq!(
            ids(&eligible_shipments(&ParcelType::Food, shipments)),
            vec!["m", "a", "r"]
        );
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let shipments = vec![shipment("1", GlobalState::Closed, TransportType::Maritime, 0)];
        assert!(eligible_shipments(&ParcelType::Chemical, shipments).is_empty());
        assert!(eligible_shipments(&ParcelType::Chemical, Vec::new()).is_empty());
    }

    #[test]
    fn test_rejection_reason_order() {
        let closed_and_full =
            shipment("1", GlobalState::Closed, TransportType::Road, MAX_PARCELS_PER_SHIPMENT);
        assert_eq!(rejection_reason(&ParcelType::Food, &closed_and_full), Some("closed"));

        let full = shipment("2", GlobalState::Open, TransportType::Road, MAX_PARCELS_PER_SHIPMENT);
        assert_eq!(rejection_reason(&ParcelType::Food, &full), Some("full"));

        let open = shipment("3", GlobalState::Open, TransportType::Road, 0);
        assert_eq!(rejection_reason(&ParcelType::Chemical, &open), Some("incompatible"));
        assert_eq!(rejection_reason(&ParcelType::Food, &open), None);
    }
}
