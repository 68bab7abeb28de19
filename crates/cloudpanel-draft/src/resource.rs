//! Resource abstraction shared by every detail editor

use serde::{Deserialize, Serialize};

/// A server-synchronized resource that can be edited through a draft
///
/// Every resource type (firewalls, disks, devices, ...) implements this trait
/// so the draft reducer and commit controller can stay generic.
pub trait Resource: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Typed field edit, one variant per editable field
    type Edit: Clone + std::fmt::Debug + Send + 'static;

    /// Resource kind, used to look up per-kind settings
    const KIND: ResourceKind;

    /// Server-side identifier
    fn id(&self) -> &str;

    /// Apply a single field edit, including any derived field writes
    fn apply(&mut self, edit: Self::Edit);

    /// Build the payload sent to the server for a commit
    ///
    /// Most resources send the draft as-is. Resources with staged operations
    /// (e.g. a disk resize) override this to mark the payload.
    fn prepare_commit(&self) -> Self {
        self.clone()
    }
}

/// Kind of managed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Organization,
    Datacenter,
    Balancer,
    Firewall,
    Disk,
    Domain,
    Device,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Organization,
        ResourceKind::Datacenter,
        ResourceKind::Balancer,
        ResourceKind::Firewall,
        ResourceKind::Disk,
        ResourceKind::Domain,
        ResourceKind::Device,
    ];
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Organization => write!(f, "organization"),
            ResourceKind::Datacenter => write!(f, "datacenter"),
            ResourceKind::Balancer => write!(f, "balancer"),
            ResourceKind::Firewall => write!(f, "firewall"),
            ResourceKind::Disk => write!(f, "disk"),
            ResourceKind::Domain => write!(f, "domain"),
            ResourceKind::Device => write!(f, "device"),
        }
    }
}
