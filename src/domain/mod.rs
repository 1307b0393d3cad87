//! Domain logic - pure release rules independent of file I/O

pub mod branch;
pub mod calendar;
pub mod maturity;
pub mod numbering;
pub mod policy;
pub mod record;
pub mod release_type;

pub use branch::BranchName;
pub use maturity::Maturity;
pub use policy::PolicyMode;
pub use record::VersionRecord;
pub use release_type::ReleaseType;
