//! Order lifecycle status.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Mirrors the host platform's order states. Only a subset matters to this
/// service: `Processing` and `Completed` count as paid when deciding
/// whether a deposit or payment plan has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    /// Whether this status represents a settled payment.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Processing | Self::Completed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "on_hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_statuses() {
        assert!(OrderStatus::Completed.is_paid());
        assert!(OrderStatus::Processing.is_paid());
        assert!(!OrderStatus::Pending.is_paid());
        assert!(!OrderStatus::Failed.is_paid());
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::OnHold,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
            OrderStatus::Refunded,
            OrderStatus::Failed,
        ] {
            let parsed: OrderStatus = status.to_string().parse().expect("roundtrip");
            assert_eq!(parsed, status);
        }
    }
}
