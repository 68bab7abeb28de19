//! Firewall definition

use crate::resource::{Resource, ResourceKind};
use crate::sublist::{OrderedField, TagField};
use serde::{Deserialize, Serialize};

/// IPv4 source matching any address
pub const ANY_IPV4: &str = "0.0.0.0/0";
/// IPv6 source matching any address
pub const ANY_IPV6: &str = "::/0";

/// Firewall with ordered ingress rules
///
/// A firewall without an organization is a node firewall and is matched
/// against node network roles instead of instance roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firewall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub network_roles: Vec<String>,
    #[serde(default)]
    pub ingress: Vec<Rule>,
}

impl Firewall {
    pub fn is_node_firewall(&self) -> bool {
        self.organization.is_none()
    }
}

/// Single ingress rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub protocol: Protocol,
    /// Port or port range (`"22"`, `"8000-8080"`), only for tcp/udp
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub source_ips: Vec<String>,
}

impl Rule {
    /// Rule accepting every protocol from any IPv4 or IPv6 source
    pub fn allow_all() -> Self {
        Self {
            protocol: Protocol::All,
            port: None,
            source_ips: vec![ANY_IPV4.to_string(), ANY_IPV6.to_string()],
        }
    }

    pub fn new(protocol: Protocol, port: Option<&str>, source_ips: &[&str]) -> Self {
        Self {
            protocol,
            port: port.map(str::to_string),
            source_ips: source_ips.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::allow_all()
    }
}

/// Rule protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    All,
    Icmp,
    Tcp,
    Udp,
    Multicast,
    Broadcast,
}

impl Protocol {
    /// Whether rules with this protocol carry a port
    pub fn has_port(&self) -> bool {
        matches!(self, Protocol::Tcp | Protocol::Udp)
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::All => write!(f, "all"),
            Protocol::Icmp => write!(f, "icmp"),
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
            Protocol::Multicast => write!(f, "multicast"),
            Protocol::Broadcast => write!(f, "broadcast"),
        }
    }
}

/// Editable firewall fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirewallEdit {
    Name(String),
    Comment(String),
    Organization(Option<String>),
    NetworkRoles(Vec<String>),
    Ingress(Vec<Rule>),
}

impl Resource for Firewall {
    type Edit = FirewallEdit;

    const KIND: ResourceKind = ResourceKind::Firewall;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, edit: FirewallEdit) {
        match edit {
            FirewallEdit::Name(name) => self.name = name,
            FirewallEdit::Comment(comment) => self.comment = comment,
            FirewallEdit::Organization(organization) => self.organization = organization,
            FirewallEdit::NetworkRoles(roles) => self.network_roles = roles,
            FirewallEdit::Ingress(rules) => self.ingress = rules,
        }
    }
}

/// Ingress rule list of a firewall
pub struct Ingress;

impl OrderedField<Firewall> for Ingress {
    type Record = Rule;

    fn records(entity: &Firewall) -> &[Rule] {
        &entity.ingress
    }

    fn into_edit(records: Vec<Rule>) -> FirewallEdit {
        FirewallEdit::Ingress(records)
    }

    fn default_record() -> Rule {
        Rule::allow_all()
    }
}

/// Network roles matched against firewall rules (case-sensitive)
pub struct NetworkRoles;

impl TagField<Firewall> for NetworkRoles {
    fn tags(entity: &Firewall) -> &[String] {
        &entity.network_roles
    }

    fn into_edit(tags: Vec<String>) -> FirewallEdit {
        FirewallEdit::NetworkRoles(tags)
    }
}
