//! Admin order log.
//!
//! Orders are read-only demonstration data for the admin panel; the
//! storefront has no checkout, so nothing appends to the log at runtime.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{OrderId, OrderStatus, Price};

/// A customer order as listed in the admin table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub total: Price,
}

impl Order {
    fn matches_term(&self, term: &str) -> bool {
        term.is_empty()
            || self.id.display_number().contains(term)
            || self.customer.to_lowercase().contains(term)
    }
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub revenue: Price,
}

/// All known orders, oldest first.
#[derive(Debug, Clone, Default)]
pub struct OrderLog {
    orders: Vec<Order>,
}

impl OrderLog {
    /// Create a log from existing orders.
    #[must_use]
    pub const fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// The four demonstration orders shown in the admin panel.
    #[must_use]
    pub fn sample() -> Self {
        let rows = [
            (1001, "John Doe", (2023, 5, 15), OrderStatus::Delivered, 12_599),
            (1002, "Jane Smith", (2023, 5, 16), OrderStatus::Shipped, 8_950),
            (1003, "Robert Johnson", (2023, 5, 17), OrderStatus::Processing, 23_475),
            (1004, "Emily Davis", (2023, 5, 18), OrderStatus::Pending, 15_620),
        ];

        let orders = rows
            .into_iter()
            .filter_map(|(id, customer, (y, m, d), status, cents)| {
                Some(Order {
                    id: OrderId::new(id),
                    customer: customer.to_string(),
                    date: NaiveDate::from_ymd_opt(y, m, d)?,
                    status,
                    total: Price::usd(Decimal::new(cents, 2)),
                })
            })
            .collect();

        Self::new(orders)
    }

    /// All orders.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders matching `status` (if given) and `term`.
    ///
    /// The term is matched case-insensitively against the `#1001`-style order
    /// number and the customer name; an empty term matches everything.
    #[must_use]
    pub fn filter(&self, status: Option<OrderStatus>, term: &str) -> Vec<&Order> {
        let term = term.trim().to_lowercase();
        self.orders
            .iter()
            .filter(|order| status.is_none_or(|s| order.status == s))
            .filter(|order| order.matches_term(&term))
            .collect()
    }

    /// Dashboard totals across the whole log.
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        let revenue = self.orders.iter().map(|order| order.total.amount).sum();
        DashboardStats {
            total_orders: self.orders.len(),
            pending_orders: self
                .orders
                .iter()
                .filter(|order| order.status == OrderStatus::Pending)
                .count(),
            revenue: Price::usd(revenue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(orders: &[&Order]) -> Vec<i32> {
        orders.iter().map(|o| o.id.as_i32()).collect()
    }

    #[test]
    fn test_sample_has_four_orders() {
        let log = OrderLog::sample();
        assert_eq!(log.orders().len(), 4);
    }

    #[test]
    fn test_filter_by_status() {
        let log = OrderLog::sample();
        let shipped = log.filter(Some(OrderStatus::Shipped), "");
        assert_eq!(ids(&shipped), vec![1002]);
        assert_eq!(log.filter(None, "").len(), 4);
    }

    #[test]
    fn test_filter_by_term() {
        let log = OrderLog::sample();
        assert_eq!(ids(&log.filter(None, "jane")), vec![1002]);
        assert_eq!(ids(&log.filter(None, "#1003")), vec![1003]);
        assert!(log.filter(Some(OrderStatus::Pending), "john").is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = OrderLog::sample().stats();
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.revenue.amount, Decimal::new(60_644, 2));
    }
}
