use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Forward-only lifecycle state of an order. The server is the sole
/// mutator; the client mirrors it by refetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Assigned,
    Accepted,
    PickedUp,
    Delivered,
    Rejected,
}

impl DeliveryStatus {
    /// Wire-format name, also used for display.
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Assigned => "ASSIGNED",
            DeliveryStatus::Accepted => "ACCEPTED",
            DeliveryStatus::PickedUp => "PICKED_UP",
            DeliveryStatus::Delivered => "DELIVERED",
            DeliveryStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Rejected)
    }

    /// The actions a driver may legally trigger from this state. Empty for
    /// terminal states. The server remains the authority; this table only
    /// decides what gets offered.
    pub fn legal_actions(self) -> &'static [OrderAction] {
        match self {
            DeliveryStatus::Assigned => &[OrderAction::Accept, OrderAction::Reject],
            DeliveryStatus::Accepted => &[OrderAction::Pickup],
            DeliveryStatus::PickedUp => &[OrderAction::Deliver],
            DeliveryStatus::Delivered | DeliveryStatus::Rejected => &[],
        }
    }
}

/// A status-transition command issued against a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    Accept,
    Pickup,
    Deliver,
    Reject,
}

impl OrderAction {
    /// URL path segment of the remote PATCH endpoint for this action.
    pub fn path_segment(self) -> &'static str {
        match self {
            OrderAction::Accept => "accept",
            OrderAction::Pickup => "picked-up",
            OrderAction::Deliver => "delivered",
            OrderAction::Reject => "reject",
        }
    }
}

impl FromStr for OrderAction {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(OrderAction::Accept),
            "pickup" | "picked-up" => Ok(OrderAction::Pickup),
            "deliver" | "delivered" => Ok(OrderAction::Deliver),
            "reject" => Ok(OrderAction::Reject),
            other => Err(ClientError::Validation(format!(
                "unknown order action '{other}'"
            ))),
        }
    }
}

/// Named filter predicate over the order list, as selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderTab {
    #[default]
    All,
    Accepted,
    Started,
    Completed,
}

impl OrderTab {
    pub fn matches(self, status: DeliveryStatus) -> bool {
        match self {
            OrderTab::All => true,
            OrderTab::Accepted => status == DeliveryStatus::Accepted,
            OrderTab::Started => status == DeliveryStatus::PickedUp,
            OrderTab::Completed => status == DeliveryStatus::Delivered,
        }
    }
}

impl FromStr for OrderTab {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(OrderTab::All),
            "accepted" => Ok(OrderTab::Accepted),
            "started" => Ok(OrderTab::Started),
            "completed" => Ok(OrderTab::Completed),
            other => Err(ClientError::Validation(format!("unknown tab '{other}'"))),
        }
    }
}

/// The authenticated courier. Non-emptiness of fields is enforced at input
/// time by callers, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shopkeeper {
    pub shopname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub flatnumber: i64,
}

/// A delivery task as returned by the remote API. Immutable client-side;
/// status changes only arrive through a fresh fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: String,
    pub delivery_status: DeliveryStatus,
    pub total_price: String,
    pub created_at: DateTime<Utc>,
    pub shopkeeper: Shopkeeper,
    pub delivery_address: DeliveryAddress,
}
