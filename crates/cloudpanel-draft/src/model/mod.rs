//! Resource models
//!
//! Each model mirrors the server JSON representation and defines its typed
//! edit enum.

mod balancer;
mod datacenter;
mod device;
mod disk;
mod domain;
mod firewall;
mod organization;

pub use balancer::{Balancer, BalancerEdit, Domains};
pub use datacenter::{Datacenter, DatacenterEdit};
pub use device::{Device, DeviceEdit, DeviceMode, DeviceType};
pub use disk::{Disk, DiskAction, DiskBackup, DiskEdit};
pub use domain::{Domain, DomainEdit};
pub use firewall::{
    ANY_IPV4, ANY_IPV6, Firewall, FirewallEdit, Ingress, NetworkRoles, Protocol, Rule,
};
pub use organization::{Organization, OrganizationEdit, Roles};
