//! Bidder registration record - `GET /auction-bidders/{id}`.

use crate::{
    core::bidder::{BidderRegistration, ItemStatus, UnpaidItem},
    entities::amount::WireAmount,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// An auction inventory item as the API describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Auction inventory id
    pub auction_inventory_id: i64,
    /// Printed barcode
    #[serde(default)]
    pub barcode: Option<String>,
    /// Supplier control number
    #[serde(default)]
    pub control_number: Option<String>,
    /// Manifest description
    #[serde(default)]
    pub description: String,
    /// Hammer price
    pub price: WireAmount,
    /// Payment status
    pub status: ItemStatus,
}

impl TryFrom<InventoryRecord> for UnpaidItem {
    type Error = Error;

    fn try_from(record: InventoryRecord) -> Result<Self> {
        Ok(Self {
            id: record.auction_inventory_id,
            price: record.price.to_money()?,
            status: record.status,
            barcode: non_blank(record.barcode),
            control_number: non_blank(record.control_number),
            description: record.description.trim().to_string(),
        })
    }
}

/// A bidder's registration in an auction, with assigned items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Registration id
    pub auction_bidders_id: i64,
    /// Bidder id
    pub bidder_id: i64,
    /// Paddle number
    #[serde(default)]
    pub bidder_number: Option<String>,
    /// Bidder display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Service charge rate in percent
    pub service_charge: WireAmount,
    /// Registration fee
    pub registration_fee: WireAmount,
    /// Whether the fee has been applied to a settlement already
    #[serde(default)]
    pub already_consumed_registration: bool,
    /// Assigned items in every status
    #[serde(default)]
    pub items: Vec<InventoryRecord>,
}

impl TryFrom<RegistrationRecord> for BidderRegistration {
    type Error = Error;

    fn try_from(record: RegistrationRecord) -> Result<Self> {
        let items = record
            .items
            .into_iter()
            .map(UnpaidItem::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            auction_bidders_id: record.auction_bidders_id,
            bidder_id: record.bidder_id,
            bidder_number: record
                .bidder_number
                .unwrap_or_else(|| record.bidder_id.to_string()),
            full_name: record.full_name.unwrap_or_default(),
            service_charge_percent: record.service_charge.to_percent()?,
            registration_fee: record.registration_fee.to_money()?,
            already_consumed_registration: record.already_consumed_registration,
            items,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
