//! Load balancer definition

use crate::resource::{Resource, ResourceKind};
use crate::sublist::TagField;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balancer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub datacenter: Option<String>,
    /// Whether the balancer is serving traffic
    #[serde(default)]
    pub state: bool,
    /// Host names routed through the balancer
    #[serde(default)]
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalancerEdit {
    Name(String),
    Comment(String),
    Organization(Option<String>),
    Datacenter(Option<String>),
    State(bool),
    Domains(Vec<String>),
}

impl Resource for Balancer {
    type Edit = BalancerEdit;

    const KIND: ResourceKind = ResourceKind::Balancer;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, edit: BalancerEdit) {
        match edit {
            BalancerEdit::Name(name) => self.name = name,
            BalancerEdit::Comment(comment) => self.comment = comment,
            BalancerEdit::Organization(organization) => self.organization = organization,
            BalancerEdit::Datacenter(datacenter) => self.datacenter = datacenter,
            BalancerEdit::State(state) => self.state = state,
            BalancerEdit::Domains(domains) => self.domains = domains,
        }
    }
}

/// Host names of a balancer
pub struct Domains;

impl TagField<Balancer> for Domains {
    fn tags(entity: &Balancer) -> &[String] {
        &entity.domains
    }

    fn into_edit(tags: Vec<String>) -> BalancerEdit {
        BalancerEdit::Domains(tags)
    }
}
