use serde::{Deserialize, Serialize};

/// Reason reported when the timer wins the probe race
pub const TIMEOUT_REASON: &str = "Connection timed out.";

/// Outcome of a single reachability probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeResult {
    Reachable { latency_ms: u64 },
    Unreachable { reason: String },
}

impl ProbeResult {
    pub fn reachable(latency_ms: u64) -> Self {
        Self::Reachable { latency_ms }
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable { reason: reason.into() }
    }

    pub fn timed_out() -> Self {
        Self::unreachable(TIMEOUT_REASON)
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }

    #[cfg(test)]
    pub fn latency_ms(&self) -> Option<u64> {
        match self {
            Self::Reachable { latency_ms } => Some(*latency_ms),
            Self::Unreachable { .. } => None,
        }
    }

    #[cfg(test)]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Reachable { .. } => None,
            Self::Unreachable { reason } => Some(reason),
        }
    }
}

impl std::fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeResult::Reachable { latency_ms } => write!(f, "up ({latency_ms}ms)"),
            ProbeResult::Unreachable { reason } => write!(f, "down: {reason}"),
        }
    }
}

/// What a timer tick does while the previous sweep is still running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Start the new sweep anyway; sweeps may interleave
    #[default]
    Allow,
    /// Skip the tick
    Skip,
}

impl std::fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlapPolicy::Allow => write!(f, "allow"),
            OverlapPolicy::Skip => write!(f, "skip"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let up = ProbeResult::reachable(40);
        assert!(up.is_reachable());
        assert_eq!(up.latency_ms(), Some(40));
        assert_eq!(up.reason(), None);

        let down = ProbeResult::timed_out();
        assert!(!down.is_reachable());
        assert_eq!(down.reason(), Some("Connection timed out."));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&ProbeResult::reachable(12)).unwrap();
        assert_eq!(json, r#"{"status":"reachable","latency_ms":12}"#);
    }
}
