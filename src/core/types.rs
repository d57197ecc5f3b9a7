use super::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of display labels as a `Copy` enum.
///
/// Every generated enum serializes as its label, lists its members in
/// declaration order through `ALL`, and parses from the label ignoring case
/// and treating `-`/`_` as spaces (so `asia-pacific` parses as `Asia Pacific`).
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DashboardError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = normalize_label(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| normalize_label(candidate.as_str()) == wanted)
                    .ok_or_else(|| {
                        DashboardError::Parse(format!(
                            "unknown {} '{}'",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }
    };
}

fn normalize_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

closed_set! {
    pub enum Department {
        Finance => "Finance",
        It => "IT",
        Hr => "HR",
        Logistics => "Logistics",
        Procurement => "Procurement",
        Operations => "Operations",
    }
}

closed_set! {
    pub enum Region {
        NorthAmerica => "North America",
        Europe => "Europe",
        AsiaPacific => "Asia Pacific",
        LatinAmerica => "Latin America",
        MiddleEast => "Middle East",
    }
}

closed_set! {
    /// Delivery status. Assigned once at generation time from risk and delay.
    pub enum ProjectStatus {
        OnTrack => "On Track",
        InProgress => "In Progress",
        Delayed => "Delayed",
        Blocked => "Blocked",
    }
}

closed_set! {
    pub enum ProjectPhase {
        Planning => "Planning",
        Execution => "Execution",
        Monitoring => "Monitoring",
        Closure => "Closure",
    }
}

closed_set! {
    /// Severity shared by activities, insights and notifications.
    pub enum Severity {
        Critical => "critical",
        Warning => "warning",
        Info => "info",
        Success => "success",
    }
}
