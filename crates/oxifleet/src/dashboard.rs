//! Mock dashboard dataset.
//!
//! Fixed sample content mirroring what the dashboard screen displays:
//! summary cards, serviced and pending-service vehicles, recent invoices,
//! weekly service spend, and daily utilization. Also the source of the
//! seed dataset served by the collection-query endpoint.

use serde::{Deserialize, Serialize};

/// A headline figure shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    /// Card title.
    pub title: String,
    /// Displayed value.
    pub value: String,
}

/// A vehicle service event, completed or upcoming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Vehicle id.
    pub id: String,
    /// Vehicle make and model.
    pub model: String,
    /// Display date of the service.
    pub date: String,
}

/// A vendor invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice id.
    pub id: String,
    /// Billing vendor.
    pub vendor: String,
    /// Display amount.
    pub amount: String,
    /// Payment status.
    pub status: String,
    /// Invoice date.
    pub date: String,
}

/// One week of service spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendPoint {
    /// Week label.
    pub week: String,
    /// Spend in dollars.
    pub spend: u32,
}

/// One day of fleet utilization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationPoint {
    /// Day label.
    pub day: String,
    /// Utilization rate in percent.
    pub rate: u32,
}

/// Everything the dashboard displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Headline summary cards.
    pub cards: Vec<SummaryCard>,
    /// Recently serviced vehicles.
    pub serviced: Vec<ServiceEntry>,
    /// Vehicles with upcoming service.
    pub pending: Vec<ServiceEntry>,
    /// Recent vendor invoices.
    pub invoices: Vec<Invoice>,
    /// Rolling four-week service spend.
    pub service_spend: Vec<SpendPoint>,
    /// Daily utilization rate for the week.
    pub utilization: Vec<UtilizationPoint>,
}

fn card(title: &str, value: &str) -> SummaryCard {
    SummaryCard {
        title: title.to_string(),
        value: value.to_string(),
    }
}

fn entry(id: &str, model: &str, date: &str) -> ServiceEntry {
    ServiceEntry {
        id: id.to_string(),
        model: model.to_string(),
        date: date.to_string(),
    }
}

fn invoice(id: &str, vendor: &str, amount: &str, status: &str, date: &str) -> Invoice {
    Invoice {
        id: id.to_string(),
        vendor: vendor.to_string(),
        amount: amount.to_string(),
        status: status.to_string(),
        date: date.to_string(),
    }
}

impl Dashboard {
    /// The fixed sample dataset.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            cards: vec![
                card("Fleet health", "92% uptime"),
                card("Vehicles serviced", "18 in January"),
                card("Open work orders", "7 active"),
            ],
            serviced: vec![
                entry("VH-884", "Freightliner Cascadia", "Jan 29, 2026"),
                entry("VH-241", "Volvo VNL 760", "Jan 27, 2026"),
                entry("VH-553", "Kenworth T680", "Jan 24, 2026"),
                entry("VH-102", "Peterbilt 579", "Jan 22, 2026"),
            ],
            pending: vec![
                entry("VH-901", "Mack Anthem", "Feb 4, 2026"),
                entry("VH-617", "International LT", "Feb 6, 2026"),
                entry("VH-730", "Volvo VNR", "Feb 9, 2026"),
            ],
            invoices: vec![
                invoice(
                    "INV-2049",
                    "Metro Service Hub",
                    "$4,860",
                    "Paid",
                    "Jan 30, 2026",
                ),
                invoice(
                    "INV-2050",
                    "Westline Tire Care",
                    "$2,140",
                    "Processing",
                    "Jan 28, 2026",
                ),
                invoice(
                    "INV-2051",
                    "Northern Fleet Works",
                    "$6,720",
                    "Due Feb 5",
                    "Jan 26, 2026",
                ),
            ],
            service_spend: vec![
                SpendPoint {
                    week: "Wk 1".to_string(),
                    spend: 12_400,
                },
                SpendPoint {
                    week: "Wk 2".to_string(),
                    spend: 9_800,
                },
                SpendPoint {
                    week: "Wk 3".to_string(),
                    spend: 15_600,
                },
                SpendPoint {
                    week: "Wk 4".to_string(),
                    spend: 11_200,
                },
            ],
            utilization: vec![
                UtilizationPoint {
                    day: "Mon".to_string(),
                    rate: 82,
                },
                UtilizationPoint {
                    day: "Tue".to_string(),
                    rate: 74,
                },
                UtilizationPoint {
                    day: "Wed".to_string(),
                    rate: 88,
                },
                UtilizationPoint {
                    day: "Thu".to_string(),
                    rate: 79,
                },
                UtilizationPoint {
                    day: "Fri".to_string(),
                    rate: 91,
                },
                UtilizationPoint {
                    day: "Sat".to_string(),
                    rate: 67,
                },
                UtilizationPoint {
                    day: "Sun".to_string(),
                    rate: 71,
                },
            ],
        }
    }
}
