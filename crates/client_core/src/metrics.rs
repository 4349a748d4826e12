use chrono::{DateTime, Datelike, Local};
use shared::domain::{DeliveryStatus, Order, OrderTab};

/// Flat payout credited for every delivered order, regardless of the
/// order's `total_price`. Business rule carried over verbatim.
pub const DELIVERY_REWARD: i64 = 50;

/// Earnings and delivery counts derived from one order list and one
/// moment in time. Recomputed from scratch on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EarningsSummary {
    pub today: i64,
    pub today_deliveries: usize,
    pub month: i64,
    pub month_deliveries: usize,
    pub total: i64,
    pub total_deliveries: usize,
}

pub fn filter_by_tab(orders: &[Order], tab: OrderTab) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| tab.matches(order.delivery_status))
        .cloned()
        .collect()
}

pub fn delivered_orders(orders: &[Order]) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| order.delivery_status == DeliveryStatus::Delivered)
        .cloned()
        .collect()
}

/// Orders currently being worked: accepted or picked up.
pub fn active_orders(orders: &[Order]) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| {
            matches!(
                order.delivery_status,
                DeliveryStatus::Accepted | DeliveryStatus::PickedUp
            )
        })
        .cloned()
        .collect()
}

/// Orders created on the same local calendar date as `now`.
pub fn orders_today(orders: &[Order], now: DateTime<Local>) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| is_same_local_day(order, now))
        .cloned()
        .collect()
}

pub fn earnings_summary(orders: &[Order], now: DateTime<Local>) -> EarningsSummary {
    let delivered: Vec<&Order> = orders
        .iter()
        .filter(|order| order.delivery_status == DeliveryStatus::Delivered)
        .collect();
    let today_deliveries = delivered
        .iter()
        .filter(|order| is_same_local_day(order, now))
        .count();
    let month_deliveries = delivered
        .iter()
        .filter(|order| is_same_local_month(order, now))
        .count();
    let total_deliveries = delivered.len();

    EarningsSummary {
        today: DELIVERY_REWARD * today_deliveries as i64,
        today_deliveries,
        month: DELIVERY_REWARD * month_deliveries as i64,
        month_deliveries,
        total: DELIVERY_REWARD * total_deliveries as i64,
        total_deliveries,
    }
}

fn is_same_local_day(order: &Order, now: DateTime<Local>) -> bool {
    order.created_at.with_timezone(&Local).date_naive() == now.date_naive()
}

fn is_same_local_month(order: &Order, now: DateTime<Local>) -> bool {
    let created = order.created_at.with_timezone(&Local);
    created.month() == now.month() && created.year() == now.year()
}

#[cfg(test)]
#[path = "tests/metrics_tests.rs"]
mod tests;
