//! Datacenter definition

use crate::resource::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatacenterEdit {
    Name(String),
    Comment(String),
}

impl Resource for Datacenter {
    type Edit = DatacenterEdit;

    const KIND: ResourceKind = ResourceKind::Datacenter;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, edit: DatacenterEdit) {
        match edit {
            DatacenterEdit::Name(name) => self.name = name,
            DatacenterEdit::Comment(comment) => self.comment = comment,
        }
    }
}
