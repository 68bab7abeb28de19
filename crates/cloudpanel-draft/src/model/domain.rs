//! DNS domain definition

use crate::resource::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub organization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEdit {
    Name(String),
    Comment(String),
    Organization(Option<String>),
}

impl Resource for Domain {
    type Edit = DomainEdit;

    const KIND: ResourceKind = ResourceKind::Domain;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, edit: DomainEdit) {
        match edit {
            DomainEdit::Name(name) => self.name = name,
            DomainEdit::Comment(comment) => self.comment = comment,
            DomainEdit::Organization(organization) => self.organization = organization,
        }
    }
}
