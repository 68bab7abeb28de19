//! Organization definition

use crate::resource::{Resource, ResourceKind};
use crate::sublist::TagField;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    /// Roles granting users access to the organization
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationEdit {
    Name(String),
    Comment(String),
    Roles(Vec<String>),
}

impl Resource for Organization {
    type Edit = OrganizationEdit;

    const KIND: ResourceKind = ResourceKind::Organization;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, edit: OrganizationEdit) {
        match edit {
            OrganizationEdit::Name(name) => self.name = name,
            OrganizationEdit::Comment(comment) => self.comment = comment,
            OrganizationEdit::Roles(roles) => self.roles = roles,
        }
    }
}

/// Organization role list
pub struct Roles;

impl TagField<Organization> for Roles {
    fn tags(entity: &Organization) -> &[String] {
        &entity.roles
    }

    fn into_edit(tags: Vec<String>) -> OrganizationEdit {
        OrganizationEdit::Roles(tags)
    }
}
