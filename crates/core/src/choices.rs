//! Closed enumerations shared by the data model, the report, and the
//! importers.
//!
//! Each enum stores a short value string in the database (`as_str`) and
//! carries a human-readable display label (`label`) used in rendered
//! output such as the report CSV. `from_str` parses the stored value and
//! returns `None` for unknown input.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Completion status
// ---------------------------------------------------------------------------

/// Whether an outing covered its line fully or partially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    Completed,
    Partial,
}

impl CompletionStatus {
    /// Return the status value as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Partial => "Partial",
        }
    }

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Partial => "Partially Worked On",
        }
    }

    /// Parse a stored value. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Completed" => Some(Self::Completed),
            "Partial" => Some(Self::Partial),
            _ => None,
        }
    }

    /// All valid stored values.
    pub const ALL: &'static [&'static str] = &["Completed", "Partial"];
}

impl std::fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Line type
// ---------------------------------------------------------------------------

/// The kind of trapping line a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    Transect,
    MouseLine,
}

impl LineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transect => "Transect",
            Self::MouseLine => "MouseLine",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Transect => "Transect",
            Self::MouseLine => "Mouse-Line",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Transect" => Some(Self::Transect),
            "MouseLine" => Some(Self::MouseLine),
            _ => None,
        }
    }

    pub const ALL: &'static [&'static str] = &["Transect", "MouseLine"];
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Station type
// ---------------------------------------------------------------------------

/// The physical construction of a trap station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationType {
    Novacoil,
    NovacoilBoxed,
    WoodenBox,
    WeirdBox,
    #[serde(rename = "NA")]
    Na,
}

impl StationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novacoil => "Novacoil",
            Self::NovacoilBoxed => "NovacoilBoxed",
            Self::WoodenBox => "WoodenBox",
            Self::WeirdBox => "WeirdBox",
            Self::Na => "NA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Novacoil => "Novacoil",
            Self::NovacoilBoxed => "Novacoil-Boxed",
            Self::WoodenBox => "Wooden-Box",
            Self::WeirdBox => "Weird-Box",
            Self::Na => "N/A",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Novacoil" => Some(Self::Novacoil),
            "NovacoilBoxed" => Some(Self::NovacoilBoxed),
            "WoodenBox" => Some(Self::WoodenBox),
            "WeirdBox" => Some(Self::WeirdBox),
            "NA" => Some(Self::Na),
            _ => None,
        }
    }

    pub const ALL: &'static [&'static str] =
        &["Novacoil", "NovacoilBoxed", "WoodenBox", "WeirdBox", "NA"];
}

impl std::fmt::Display for StationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Issue type
// ---------------------------------------------------------------------------

/// What kind of defect or observation an issue records.
///
/// Declaration order matters: the outing importer classifies free-text
/// notes by the first variant whose label occurs in the note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    Complicated,
    MissingStation,
    MissingHoop,
    MissingLid,
    MissingMesh,
    #[serde(rename = "Needs_New_ICC")]
    NeedsNewIcc,
    NeedsReplacing,
    SlightlyRotten,
    VeryRotten,
    RustingHoop,
    NeedsClearing,
    NeedsRope,
    NeedsFrequentAttn,
    RopeOnDeadTree,
    RequiresChainsaw,
    Safety,
    Flora,
    Fauna,
    Weed,
    Note,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complicated => "Complicated",
            Self::MissingStation => "MissingStation",
            Self::MissingHoop => "MissingHoop",
            Self::MissingLid => "MissingLid",
            Self::MissingMesh => "MissingMesh",
            Self::NeedsNewIcc => "Needs_New_ICC",
            Self::NeedsReplacing => "NeedsReplacing",
            Self::SlightlyRotten => "SlightlyRotten",
            Self::VeryRotten => "VeryRotten",
            Self::RustingHoop => "RustingHoop",
            Self::NeedsClearing => "NeedsClearing",
            Self::NeedsRope => "NeedsRope",
            Self::NeedsFrequentAttn => "NeedsFrequentAttn",
            Self::RopeOnDeadTree => "RopeOnDeadTree",
            Self::RequiresChainsaw => "RequiresChainsaw",
            Self::Safety => "Safety",
            Self::Flora => "Flora",
            Self::Fauna => "Fauna",
            Self::Weed => "Weed",
            Self::Note => "Note",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Complicated => "Complicated",
            Self::MissingStation => "Missing Station",
            Self::MissingHoop => "Missing Hoop",
            Self::MissingLid => "Missing Lid",
            Self::MissingMesh => "Missing Mesh",
            Self::NeedsNewIcc => "Needs new ICC",
            Self::NeedsReplacing => "Needs Replacing",
            Self::SlightlyRotten => "Slightly Rotten",
            Self::VeryRotten => "Very Rotten",
            Self::RustingHoop => "Rusting Hoop",
            Self::NeedsClearing => "Needs Clearing",
            Self::NeedsRope => "Needs Rope",
            Self::NeedsFrequentAttn => "Needs Frequent Attention",
            Self::RopeOnDeadTree => "Rope On Dead Tree",
            Self::RequiresChainsaw => "Requires Chainsaw",
            Self::Safety => "Safety",
            Self::Flora => "Flora",
            Self::Fauna => "Fauna",
            Self::Weed => "Weed",
            Self::Note => "Note",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Complicated" => Some(Self::Complicated),
            "MissingStation" => Some(Self::MissingStation),
            "MissingHoop" => Some(Self::MissingHoop),
            "MissingLid" => Some(Self::MissingLid),
            "MissingMesh" => Some(Self::MissingMesh),
            "Needs_New_ICC" => Some(Self::NeedsNewIcc),
            "NeedsReplacing" => Some(Self::NeedsReplacing),
            "SlightlyRotten" => Some(Self::SlightlyRotten),
            "VeryRotten" => Some(Self::VeryRotten),
            "RustingHoop" => Some(Self::RustingHoop),
            "NeedsClearing" => Some(Self::NeedsClearing),
            "NeedsRope" => Some(Self::NeedsRope),
            "NeedsFrequentAttn" => Some(Self::NeedsFrequentAttn),
            "RopeOnDeadTree" => Some(Self::RopeOnDeadTree),
            "RequiresChainsaw" => Some(Self::RequiresChainsaw),
            "Safety" => Some(Self::Safety),
            "Flora" => Some(Self::Flora),
            "Fauna" => Some(Self::Fauna),
            "Weed" => Some(Self::Weed),
            "Note" => Some(Self::Note),
            _ => None,
        }
    }

    /// All variants in declaration (classification) order.
    pub const VARIANTS: &'static [Self] = &[
        Self::Complicated,
        Self::MissingStation,
        Self::MissingHoop,
        Self::MissingLid,
        Self::MissingMesh,
        Self::NeedsNewIcc,
        Self::NeedsReplacing,
        Self::SlightlyRotten,
        Self::VeryRotten,
        Self::RustingHoop,
        Self::NeedsClearing,
        Self::NeedsRope,
        Self::NeedsFrequentAttn,
        Self::RopeOnDeadTree,
        Self::RequiresChainsaw,
        Self::Safety,
        Self::Flora,
        Self::Fauna,
        Self::Weed,
        Self::Note,
    ];

    /// All valid stored values.
    pub const ALL: &'static [&'static str] = &[
        "Complicated",
        "MissingStation",
        "MissingHoop",
        "MissingLid",
        "MissingMesh",
        "Needs_New_ICC",
        "NeedsReplacing",
        "SlightlyRotten",
        "VeryRotten",
        "RustingHoop",
        "NeedsClearing",
        "NeedsRope",
        "NeedsFrequentAttn",
        "RopeOnDeadTree",
        "RequiresChainsaw",
        "Safety",
        "Flora",
        "Fauna",
        "Weed",
        "Note",
    ];
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Issue status
// ---------------------------------------------------------------------------

/// Resolution state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueStatus {
    Fixed,
    NeedsWork,
    Progressing,
    NeedsRepeating,
    NoActionReq,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::NeedsWork => "NeedsWork",
            Self::Progressing => "Progressing",
            Self::NeedsRepeating => "NeedsRepeating",
            Self::NoActionReq => "NoActionReq",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::NeedsWork => "Needs Work",
            Self::Progressing => "Progressing",
            Self::NeedsRepeating => "Needs Repeating",
            Self::NoActionReq => "No action req.",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Fixed" => Some(Self::Fixed),
            "NeedsWork" => Some(Self::NeedsWork),
            "Progressing" => Some(Self::Progressing),
            "NeedsRepeating" => Some(Self::NeedsRepeating),
            "NoActionReq" => Some(Self::NoActionReq),
            _ => None,
        }
    }

    /// An issue is resolved once it is fixed or needs no action.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Fixed | Self::NoActionReq)
    }

    pub const ALL: &'static [&'static str] = &[
        "Fixed",
        "NeedsWork",
        "Progressing",
        "NeedsRepeating",
        "NoActionReq",
    ];

    /// Stored values counted as resolved (used in SQL filters).
    pub const RESOLVED: &'static [&'static str] = &["Fixed", "NoActionReq"];
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Audit action
// ---------------------------------------------------------------------------

/// Authentication outcome recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Login,
    Logout,
    LoginFailed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Logout => "Logout",
            Self::LoginFailed => "LoginFailed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Logout => "Logout",
            Self::LoginFailed => "Login Failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Login" => Some(Self::Login),
            "Logout" => Some(Self::Logout),
            "LoginFailed" => Some(Self::LoginFailed),
            _ => None,
        }
    }

    pub const ALL: &'static [&'static str] = &["Login", "Logout", "LoginFailed"];
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
