//! Quotes and work orders produced from a design.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::SelectedDevice;

/// Minimum design fee.
pub const MIN_DESIGN_FEE: u64 = 300;

/// Design fee per room.
pub const DESIGN_FEE_PER_ROOM: u64 = 100;

/// Installation fee per device unit.
pub const INSTALLATION_FEE_PER_UNIT: u64 = 50;

/// Flat commissioning and training fee.
pub const SERVICE_FEE: u64 = 200;

/// Format an amount as `¥` with thousands separators.
#[must_use]
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    out.push('¥');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Price breakdown for the current design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Number of rooms in the design.
    pub room_count: usize,
    /// Number of distinct devices.
    pub device_kinds: usize,
    /// Sum of device quantities.
    pub device_units: u64,
    /// Sum of price × quantity.
    pub device_total: u64,
    /// `max(300, rooms × 100)`.
    pub design_fee: u64,
    /// `units × 50`.
    pub installation_fee: u64,
    /// Flat service fee.
    pub service_fee: u64,
}

impl Quote {
    /// Compute a quote for a room count and device selection.
    #[must_use]
    pub fn new(room_count: usize, devices: &[SelectedDevice]) -> Self {
        let device_units: u64 = devices.iter().map(|d| u64::from(d.quantity)).sum();
        let device_total = devices.iter().map(SelectedDevice::subtotal).sum();
        let design_fee = MIN_DESIGN_FEE.max(room_count as u64 * DESIGN_FEE_PER_ROOM);
        Self {
            room_count,
            device_kinds: devices.len(),
            device_units,
            device_total,
            design_fee,
            installation_fee: device_units * INSTALLATION_FEE_PER_UNIT,
            service_fee: SERVICE_FEE,
        }
    }

    /// Grand total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.device_total + self.design_fee + self.installation_fee + self.service_fee
    }
}

/// Work order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, awaiting confirmation.
    Pending,
    /// Design in progress.
    Designing,
    /// Quote delivered.
    Quoted,
    /// Installation in progress.
    Installing,
    /// Done.
    Completed,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Localized status label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "待确认",
            Self::Designing => "设计中",
            Self::Quoted => "已报价",
            Self::Installing => "安装中",
            Self::Completed => "已完成",
            Self::Cancelled => "已取消",
        }
    }

    /// Badge colour.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Pending => "#ff9500",
            Self::Designing | Self::Installing => "#007AFF",
            Self::Quoted => "#666",
            Self::Completed => "#52c41a",
            Self::Cancelled => "#ff3b30",
        }
    }

    /// Index into [`PROGRESS_STEPS`]. Cancelled orders have no current step.
    #[must_use]
    pub const fn step_index(self) -> Option<usize> {
        match self {
            Self::Pending => Some(0),
            Self::Designing => Some(1),
            Self::Quoted => Some(2),
            Self::Installing => Some(3),
            Self::Completed => Some(4),
            Self::Cancelled => None,
        }
    }

    /// Completion flag for each progress step.
    #[must_use]
    pub fn completed_steps(self) -> [bool; STEP_COUNT] {
        let mut steps = [false; PROGRESS_STEPS.len()];
        if let Some(current) = self.step_index() {
            for step in steps.iter_mut().take(current + 1) {
                *step = true;
            }
        }
        steps
    }

    /// Whether the order is still being worked on.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::Pending | Self::Designing | Self::Installing)
    }
}

/// Number of progress steps.
pub const STEP_COUNT: usize = 5;

/// Labels for the progress steps, indexed by [`OrderStatus::step_index`].
pub const PROGRESS_STEPS: [&str; STEP_COUNT] = [
    "需求确认",
    "方案设计",
    "报价确认",
    "施工安装",
    "验收完成",
];

/// Order list tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    /// Every order.
    #[default]
    All,
    /// Pending, designing or installing.
    InProgress,
    /// Completed only.
    Completed,
    /// Cancelled only.
    Cancelled,
}

impl OrderFilter {
    /// Whether an order belongs to this tab.
    #[must_use]
    pub fn matches(self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::InProgress => order.status.is_in_progress(),
            Self::Completed => order.status == OrderStatus::Completed,
            Self::Cancelled => order.status == OrderStatus::Cancelled,
        }
    }
}

/// A work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order number.
    pub id: String,
    /// Title.
    pub title: String,
    /// Status.
    pub status: OrderStatus,
    /// Progress percentage, 0–100.
    pub progress: u8,
    /// Creation time.
    pub create_time: NaiveDateTime,
    /// Total amount.
    pub amount: u64,
}

impl Order {
    /// Build a pending order from a quote at submission time.
    #[must_use]
    pub fn from_quote(quote: &Quote, now: NaiveDateTime) -> Self {
        Self {
            id: format!("WD{}", now.and_utc().timestamp_millis()),
            title: format!("{}房间智能家居方案", quote.room_count),
            status: OrderStatus::Pending,
            progress: 0,
            create_time: now,
            amount: quote.total(),
        }
    }

    /// Amount formatted for display.
    #[must_use]
    pub fn formatted_amount(&self) -> String {
        format_price(self.amount)
    }

    /// Creation time formatted as `YYYY-MM-DD HH:MM`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.create_time.format("%Y-%m-%d %H:%M").to_string()
    }

    /// The two example orders shown on a fresh install.
    #[must_use]
    pub fn seeded() -> Vec<Self> {
        let at = |s: &str| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap_or_default()
        };
        vec![
            Self {
                id: "WD202403150001".to_string(),
                title: "三室两厅智能家居方案".to_string(),
                status: OrderStatus::Designing,
                progress: 40,
                create_time: at("2024-03-15 14:30"),
                amount: 15_600,
            },
            Self {
                id: "WD202403120002".to_string(),
                title: "两室一厅安防套装".to_string(),
                status: OrderStatus::Completed,
                progress: 100,
                create_time: at("2024-03-12 09:15"),
                amount: 3_200,
            },
        ]
    }
}
