//! Disk definition

use crate::resource::{Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Block storage disk, optionally attached to an instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
    /// Attached instance, `None` for a detached disk
    #[serde(default)]
    pub instance: Option<String>,
    /// Attachment index on the instance
    #[serde(default)]
    pub index: Option<u32>,
    /// Size in GB
    pub size: u64,
    /// Staged size for a resize, `0` when no resize is staged
    #[serde(default)]
    pub new_size: u64,
    /// Local-only resize toggle, never sent to the server
    #[serde(skip)]
    pub resize: bool,
    #[serde(default)]
    pub delete_protection: bool,
    /// Automatic backups enabled
    #[serde(default)]
    pub backup: bool,
    #[serde(default)]
    pub backups: Vec<DiskBackup>,
    /// Operation requested with a commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<DiskAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_image: Option<String>,
}

/// Backup image of a disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskBackup {
    pub image: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

/// Operation requested alongside a disk commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskAction {
    Expand,
    Restore,
}

/// Editable disk fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskEdit {
    Name(String),
    Comment(String),
    Instance(Option<String>),
    Index(Option<u32>),
    DeleteProtection(bool),
    Backup(bool),
    /// Toggle the resize capability
    Resize(bool),
    NewSize(u64),
}

impl Disk {
    pub fn is_attached(&self) -> bool {
        self.instance.is_some()
    }

    /// Build a restore request from an explicit image or the latest backup
    ///
    /// Returns `None` when no image was chosen and the disk has no backups.
    pub fn restore_request(&self, image: Option<&str>) -> Option<Disk> {
        let image = match image {
            Some(image) if !image.is_empty() => image.to_string(),
            _ => self.backups.first()?.image.clone(),
        };

        let mut request = self.clone();
        request.action = Some(DiskAction::Restore);
        request.restore_image = Some(image);
        Some(request)
    }
}

impl Resource for Disk {
    type Edit = DiskEdit;

    const KIND: ResourceKind = ResourceKind::Disk;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, edit: DiskEdit) {
        match edit {
            DiskEdit::Name(name) => self.name = name,
            DiskEdit::Comment(comment) => self.comment = comment,
            DiskEdit::Instance(instance) => {
                self.instance = instance;
                if self.index.is_none() {
                    self.index = Some(0);
                }
            }
            DiskEdit::Index(index) => self.index = index,
            DiskEdit::DeleteProtection(enabled) => self.delete_protection = enabled,
            DiskEdit::Backup(enabled) => self.backup = enabled,
            DiskEdit::Resize(enabled) => {
                self.resize = enabled;
                self.new_size = if enabled { self.size } else { 0 };
            }
            DiskEdit::NewSize(size) => self.new_size = size,
        }
    }

    fn prepare_commit(&self) -> Self {
        let mut payload = self.clone();
        if payload.resize && payload.new_size > payload.size {
            payload.action = Some(DiskAction::Expand);
        }
        payload
    }
}
