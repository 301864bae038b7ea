use serde::Serialize;
use std::fmt;

/// 已正規化（trim + 小寫）並通過文法檢查的網域名稱。
///
/// 只能經由 [`crate::core::validator`] 建立。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub(crate) fn new_unchecked(canonical: String) -> Self {
        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 最後一個 `.` 之後的部分
    pub fn suffix_label(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or_default()
    }

    pub fn suffix(&self) -> Option<Suffix> {
        Suffix::from_label(self.suffix_label())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Allow-listed suffixes, declared in keep-best preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suffix {
    Com,
    App,
    Xyz,
}

impl Suffix {
    pub const ALL: [Suffix; 3] = [Suffix::Com, Suffix::App, Suffix::Xyz];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "com" => Some(Suffix::Com),
            "app" => Some(Suffix::App),
            "xyz" => Some(Suffix::Xyz),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Suffix::Com => "com",
            Suffix::App => "app",
            Suffix::Xyz => "xyz",
        }
    }

    /// 越小越好：.com < .app < .xyz
    pub fn rank(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Unknown,
    Available,
    Unavailable,
}

impl AvailabilityStatus {
    pub fn from_available(available: bool) -> Self {
        if available {
            AvailabilityStatus::Available
        } else {
            AvailabilityStatus::Unavailable
        }
    }

    pub fn is_resolved(self) -> bool {
        self != AvailabilityStatus::Unknown
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AvailabilityStatus::Unknown => "Checking...",
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::Unavailable => "Unavailable",
        };
        f.write_str(label)
    }
}

/// Identifies one insertion of a domain. A probe started for an earlier
/// insertion can never resolve a later one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTicket {
    pub domain: Domain,
    pub insertion: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    pub domain: Domain,
    pub status: AvailabilityStatus,
    #[serde(skip)]
    pub(crate) insertion: u64,
}

impl CartEntry {
    pub fn new(domain: Domain, insertion: u64) -> Self {
        Self {
            domain,
            status: AvailabilityStatus::Unknown,
            insertion,
        }
    }

    pub fn ticket(&self) -> ProbeTicket {
        ProbeTicket {
            domain: self.domain.clone(),
            insertion: self.insertion,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == AvailabilityStatus::Available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub available: usize,
    pub total: usize,
    pub required: usize,
}

impl CartSummary {
    pub fn can_finalize(&self) -> bool {
        self.total == self.required && self.available == self.required
    }
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let note = if self.total > self.required {
            "Too many!"
        } else if self.can_finalize() {
            "Ready to purchase"
        } else {
            "Need more"
        };
        write!(
            f,
            "{} of {} domains added ({})",
            self.available, self.required, note
        )
    }
}
