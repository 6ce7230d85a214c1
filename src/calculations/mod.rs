pub mod allocation_pass;
pub mod timeline_pass;

pub use allocation_pass::AllocationPass;
pub use timeline_pass::TimelinePass;
